mod helpers;

mod resolve_test;
mod role_test;
