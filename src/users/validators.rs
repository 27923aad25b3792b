// src/users/validators.rs

use super::models::{ApplyJobRequest, CreateOrGetUserRequest};
use crate::common::{ValidationResult, Validator};

pub struct CreateOrGetUserValidator;

impl Validator<CreateOrGetUserRequest> for CreateOrGetUserValidator {
    fn validate(&self, data: &CreateOrGetUserRequest) -> ValidationResult {
        let mut result = ValidationResult::new();

        result.require("userId", &data.user_id, "User id is required");
        result.require("email", &data.email, "Email is required");
        result.max_len("email", &data.email, 255);

        if !data.email.trim().is_empty() && !data.email.contains('@') {
            result.add_error("email", "Email must be a valid address");
        }

        if let Some(name) = &data.name {
            result.max_len("name", name, 255);
        }

        result
    }
}

pub struct ApplyJobValidator;

impl Validator<ApplyJobRequest> for ApplyJobValidator {
    fn validate(&self, data: &ApplyJobRequest) -> ValidationResult {
        let mut result = ValidationResult::new();
        result.require("jobId", &data.job_id, "Job id is required");
        result
    }
}
