pub mod backend;
pub mod data_url;
pub mod http;
pub mod inference;
pub mod job_client;
pub mod mapper;
pub mod orchestrator;
pub mod poller;
pub mod replicate;
pub mod space;
