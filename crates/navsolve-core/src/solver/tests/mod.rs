mod evaluator_tests;
mod fixtures;
