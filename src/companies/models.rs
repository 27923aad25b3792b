use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use std::fmt;
use std::str::FromStr;

use crate::jobs::models::{Job, JobSummary};

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Company {
    #[serde(rename = "_id")]
    pub id: String,
    pub name: String,
    pub email: String,
    pub image: String,
    pub created_at: Option<String>,
}

/// Job posting as listed on the recruiter dashboard
#[derive(Debug, Serialize, FromRow)]
pub struct JobWithApplicants {
    #[sqlx(flatten)]
    #[serde(flatten)]
    pub job: Job,
    pub applicants: i64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ApplicationStatus {
    Pending,
    Accepted,
    Rejected,
}

impl ApplicationStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ApplicationStatus::Pending => "Pending",
            ApplicationStatus::Accepted => "Accepted",
            ApplicationStatus::Rejected => "Rejected",
        }
    }
}

impl fmt::Display for ApplicationStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ApplicationStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Pending" => Ok(ApplicationStatus::Pending),
            "Accepted" => Ok(ApplicationStatus::Accepted),
            "Rejected" => Ok(ApplicationStatus::Rejected),
            other => Err(format!(
                "Invalid status '{}': expected Pending, Accepted or Rejected",
                other
            )),
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct PostJobRequest {
    pub title: String,
    pub description: String,
    pub location: String,
    pub salary: i64,
    pub level: String,
    pub category: String,
}

#[derive(Debug, Deserialize)]
pub struct ChangeStatusRequest {
    pub id: String,
    pub status: String,
}

#[derive(Debug, Deserialize)]
pub struct ChangeVisibilityRequest {
    pub id: String,
}

/// Flat row of an application joined with its applicant and job
#[derive(Debug, FromRow)]
pub struct CompanyApplicationRow {
    pub id: String,
    pub user_id: String,
    pub company_id: String,
    pub job_id: String,
    pub status: String,
    pub date: i64,
    pub user_name: String,
    pub user_image: String,
    pub user_resume: String,
    pub job_title: String,
    pub job_description: String,
    pub job_location: String,
    pub job_category: String,
    pub job_level: String,
    pub job_salary: i64,
}

#[derive(Debug, Serialize)]
pub struct ApplicantSummary {
    #[serde(rename = "_id")]
    pub id: String,
    pub name: String,
    pub image: String,
    pub resume: String,
}

/// Application as seen by the recruiter, `userId` and `jobId` populated
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CompanyApplicationResponse {
    #[serde(rename = "_id")]
    pub id: String,
    pub user_id: ApplicantSummary,
    pub job_id: JobSummary,
    pub company_id: String,
    pub status: String,
    pub date: i64,
}

impl From<CompanyApplicationRow> for CompanyApplicationResponse {
    fn from(row: CompanyApplicationRow) -> Self {
        CompanyApplicationResponse {
            id: row.id,
            user_id: ApplicantSummary {
                id: row.user_id,
                name: row.user_name,
                image: row.user_image,
                resume: row.user_resume,
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
            company_id: row.company_id,
            status: row.status,
            date: row.date,
        }
    }
}
