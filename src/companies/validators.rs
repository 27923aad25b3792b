use super::models::{ApplicationStatus, ChangeStatusRequest, PostJobRequest};
use crate::common::{ValidationResult, Validator};

pub struct PostJobValidator;

impl Validator<PostJobRequest> for PostJobValidator {
    fn validate(&self, data: &PostJobRequest) -> ValidationResult {
        let mut result = ValidationResult::new();

        result.require("title", &data.title, "Job title is required");
        result.max_len("title", &data.title, 255);

        result.require("description", &data.description, "Description is required");
        result.max_len("description", &data.description, 10000);

        result.require("location", &data.location, "Location is required");
        result.max_len("location", &data.location, 255);

        result.require("category", &data.category, "Category is required");
        result.require("level", &data.level, "Level is required");

        if data.salary < 0 {
            result.add_error("salary", "Salary cannot be negative");
        }

        result
    }
}

pub struct ChangeStatusValidator;

impl Validator<ChangeStatusRequest> for ChangeStatusValidator {
    fn validate(&self, data: &ChangeStatusRequest) -> ValidationResult {
        let mut result = ValidationResult::new();

        result.require("id", &data.id, "Application id is required");

        if let Err(message) = data.status.parse::<ApplicationStatus>() {
            result.add_error("status", &message);
        }

        result
    }
}
