//! Helper functions shared by handlers and the router.

pub mod fanout;
