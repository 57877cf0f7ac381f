//! Background tasks owned by the runtime.
mod run;

pub(crate) use run::RunWorker;
