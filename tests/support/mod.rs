#![allow(dead_code)]

pub mod config;
pub mod processor_stub;
pub mod recording_repository;
pub mod redis_container;
pub mod scripted_processor_client;
pub mod wait;
