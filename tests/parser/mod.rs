mod tests_csharp;
mod tests_diagnostics;
mod tests_lexer;
mod tests_markup;
mod tests_vb;
