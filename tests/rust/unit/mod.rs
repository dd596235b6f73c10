mod from_clause_tests;
mod render_golden_tests;
