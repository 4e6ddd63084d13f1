//! Process entry: [`run::execute`] turns parsed arguments into a running server.

pub mod run;
