mod fixture;
mod session_test;
