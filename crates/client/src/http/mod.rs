//! HTTP request dispatch

mod dispatcher;

pub use dispatcher::RequestDispatcher;
