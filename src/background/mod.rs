pub mod posts_broker;
