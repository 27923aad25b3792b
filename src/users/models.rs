// src/users/models.rs

use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use crate::companies::models::Company;
use crate::jobs::models::JobSummary;

pub const USER_COLUMNS: &str = "id, name, email, image, resume, created_at";

#[derive(FromRow, Serialize, Deserialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct User {
    /// Clerk user id
    #[serde(rename = "_id")]
    pub id: String,
    pub name: String,
    pub email: String,
    pub image: String,
    /// URL of the uploaded resume, empty until one is uploaded
    pub resume: String,
    pub created_at: Option<String>,
}

#[derive(Deserialize, Debug)]
#[serde(rename_all = "camelCase")]
pub struct CreateOrGetUserRequest {
    pub user_id: String,
    #[serde(default)]
    pub name: Option<String>,
    pub email: String,
    #[serde(default)]
    pub image: Option<String>,
}

#[derive(Deserialize, Debug)]
#[serde(rename_all = "camelCase")]
pub struct ApplyJobRequest {
    pub job_id: String,
}

#[derive(FromRow, Debug)]
pub struct UserApplicationRow {
    pub id: String,
    pub user_id: String,
    pub status: String,
    pub date: i64,
    pub company_id: String,
    pub company_name: String,
    pub company_email: String,
    pub company_image: String,
    pub job_id: String,
    pub job_title: String,
    pub job_description: String,
    pub job_location: String,
    pub job_category: String,
    pub job_level: String,
    pub job_salary: i64,
}

/// Application as seen by the applicant, `companyId` and `jobId` populated
#[derive(Serialize, Debug)]
#[serde(rename_all = "camelCase")]
pub struct UserApplicationResponse {
    #[serde(rename = "_id")]
    pub id: String,
    pub user_id: String,
    pub company_id: Company,
    pub job_id: JobSummary,
    pub status: String,
    pub date: i64,
}

impl From<UserApplicationRow> for UserApplicationResponse {
    fn from(row: UserApplicationRow) -> Self {
        UserApplicationResponse {
            id: row.id,
            user_id: row.user_id,
            company_id: Company {
                id: row.company_id,
                name: row.company_name,
                email: row.company_email,
                image: row.company_image,
                created_at: None,
            },
            job_id: JobSummary {
                id: row.job_id,
                title: row.job_title,
                description: row.job_description,
                location: row.job_location,
                category: row.job_category,
                level: row.job_level,
                salary: row.job_salary,
            },
            status: row.status,
            date: row.date,
        }
    }
}
