// src/jobs/models.rs

use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use crate::companies::models::Company;

/// Columns of a job joined with its company, shared by the public listings
pub const JOB_WITH_COMPANY_SELECT: &str = r#"
    SELECT
        j.id, j.title, j.description, j.location, j.category, j.level,
        j.salary, j.date, j.visible, j.company_id,
        c.name AS company_name, c.email AS company_email,
        c.image AS company_image, c.created_at AS company_created_at
    FROM jobs j
    JOIN companies c ON c.id = j.company_id
"#;

#[derive(FromRow, Serialize, Deserialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct Job {
    #[serde(rename = "_id")]
    pub id: String,
    pub title: String,
    pub description: String,
    pub location: String,
    pub category: String,
    pub level: String,
    pub salary: i64,
    /// Milliseconds since the Unix epoch
    pub date: i64,
    pub visible: bool,
    pub company_id: String,
}

#[derive(FromRow, Debug)]
pub struct JobWithCompanyRow {
    pub id: String,
    pub title: String,
    pub description: String,
    pub location: String,
    pub category: String,
    pub level: String,
    pub salary: i64,
    pub date: i64,
    pub visible: bool,
    pub company_id: String,
    pub company_name: String,
    pub company_email: String,
    pub company_image: String,
    pub company_created_at: Option<String>,
}

/// Public job, `companyId` populated with the company
#[derive(Serialize, Debug)]
#[serde(rename_all = "camelCase")]
pub struct JobResponse {
    #[serde(rename = "_id")]
    pub id: String,
    pub title: String,
    pub description: String,
    pub location: String,
    pub category: String,
    pub level: String,
    pub salary: i64,
    pub date: i64,
    pub visible: bool,
    pub company_id: Company,
}

impl From<JobWithCompanyRow> for JobResponse {
    fn from(row: JobWithCompanyRow) -> Self {
        JobResponse {
            company_id: Company {
                id: row.company_id,
                name: row.company_name,
                email: row.company_email,
                image: row.company_image,
                created_at: row.company_created_at,
            },
            id: row.id,
            title: row.title,
            description: row.description,
            location: row.location,
            category: row.category,
            level: row.level,
            salary: row.salary,
            date: row.date,
            visible: row.visible,
        }
    }
}

/// Job fields embedded in application listings
#[derive(Serialize, Debug, Clone)]
pub struct JobSummary {
    #[serde(rename = "_id")]
    pub id: String,
    pub title: String,
    pub description: String,
    pub location: String,
    pub category: String,
    pub level: String,
    pub salary: i64,
}
