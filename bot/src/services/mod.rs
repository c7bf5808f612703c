pub mod rate_service;
