mod link_token_tests;
mod policy_tests;
