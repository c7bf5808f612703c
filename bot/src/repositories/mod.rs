pub mod rate_repository;
