mod tests_lossless;
mod tests_rewrite;
mod tests_visitor;
