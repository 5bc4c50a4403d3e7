pub mod convert_brokers;
pub mod serve;
