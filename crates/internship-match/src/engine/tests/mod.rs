mod common;
mod intake;
mod ranking;
mod service;
