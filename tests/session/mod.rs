mod tests_cancellation;
mod tests_parallel;
