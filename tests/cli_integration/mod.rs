mod apply_command_tests;
mod test_utils;
mod validate_command_tests;
