//! The finalized output row.

use chrono::NaiveDate;
use serde::Serialize;

use super::extraction::ExtractionResult;
use super::tag::Tag;

/// Fallback for text fields that could not be read from the page.
pub const NOT_AVAILABLE: &str = "Not available";

/// Fallback for optional page fields (location, salary).
pub const NOT_SPECIFIED: &str = "Not specified";

/// Fields read directly from a listing and its detail panel.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListingFields {
    pub title: String,
    pub company: String,
    pub location: String,
    pub logo: String,
    pub salary: String,
    pub description: String,
    pub external_link: String,
}

/// One schema-complete job posting.
///
/// Every field holds a value or an explicit sentinel. Serialized column
/// names and order are the output contract; see [`JobRecord::COLUMNS`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct JobRecord {
    #[serde(rename = "sourceType")]
    pub source_type: String,
    #[serde(rename = "CompanyName")]
    pub company_name: String,
    #[serde(rename = "CompanyLogo")]
    pub company_logo: String,
    #[serde(rename = "jobTitle")]
    pub job_title: String,
    #[serde(rename = "jobDescription")]
    pub job_description: String,
    pub skills: Vec<String>,
    pub location: String,
    #[serde(rename = "employmentType")]
    pub employment_type: String,
    #[serde(rename = "jobType")]
    pub job_type: String,
    #[serde(rename = "minExperience")]
    pub min_experience: u32,
    #[serde(rename = "salaryRange")]
    pub salary_range: String,
    pub duration: String,
    #[serde(rename = "startDate")]
    pub start_date: Option<NaiveDate>,
    #[serde(rename = "externalLink")]
    pub external_link: String,
    pub qualifications: Vec<String>,
    pub tags: Vec<Tag>,
    #[serde(rename = "expiresAt")]
    pub expires_at: NaiveDate,
}

impl JobRecord {
    /// Column names in output order.
    pub const COLUMNS: [&'static str; 17] = [
        "sourceType",
        "CompanyName",
        "CompanyLogo",
        "jobTitle",
        "jobDescription",
        "skills",
        "location",
        "employmentType",
        "jobType",
        "minExperience",
        "salaryRange",
        "duration",
        "startDate",
        "externalLink",
        "qualifications",
        "tags",
        "expiresAt",
    ];

    /// Merge page fields with the model's answer and already-resolved dates.
    pub fn assemble(
        source_type: impl Into<String>,
        listing: ListingFields,
        extraction: ExtractionResult,
        start_date: Option<NaiveDate>,
        expires_at: NaiveDate,
    ) -> Self {
        Self {
            source_type: source_type.into(),
            company_name: listing.company,
            company_logo: listing.logo,
            job_title: listing.title,
            job_description: listing.description,
            skills: extraction.skills,
            location: listing.location,
            employment_type: extraction.employment_type,
            job_type: extraction.job_type,
            min_experience: extraction.min_experience,
            salary_range: listing.salary,
            duration: extraction.duration,
            start_date,
            external_link: listing.external_link,
            qualifications: extraction.qualifications,
            tags: extraction.tags,
            expires_at,
        }
    }

    /// Cell values in [`JobRecord::COLUMNS`] order.
    ///
    /// Lists are rendered as JSON arrays, dates as `yyyy-mm-dd`, an absent
    /// start date as an empty cell.
    pub fn to_row(&self) -> Vec<String> {
        let tags: Vec<&str> = self.tags.iter().map(Tag::as_str).collect();
        vec![
            self.source_type.clone(),
            self.company_name.clone(),
            self.company_logo.clone(),
            self.job_title.clone(),
            self.job_description.clone(),
            json_list(&self.skills),
            self.location.clone(),
            self.employment_type.clone(),
            self.job_type.clone(),
            self.min_experience.to_string(),
            self.salary_range.clone(),
            self.duration.clone(),
            self.start_date.map(|d| d.to_string()).unwrap_or_default(),
            self.external_link.clone(),
            json_list(&self.qualifications),
            json_list(&tags),
            self.expires_at.to_string(),
        ]
    }
}

fn json_list<S: AsRef<str>>(items: &[S]) -> String {
    let items: Vec<&str> = items.iter().map(AsRef::as_ref).collect();
    serde_json::to_string(&items).unwrap_or_else(|_| "[]".to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> JobRecord {
        let listing = ListingFields {
            title: "Data Engineer".into(),
            company: "Acme".into(),
            location: "Pune".into(),
            logo: NOT_AVAILABLE.into(),
            salary: NOT_SPECIFIED.into(),
            description: "Build pipelines".into(),
            external_link: "https://acme.example/apply".into(),
        };
        let mut extraction =
            ExtractionResult::fallback(NaiveDate::from_ymd_opt(2024, 6, 1).unwrap(), 7);
        extraction.skills = vec!["SQL".into(), "Airflow".into()];
        extraction.tags = vec![Tag::DataScience];

        JobRecord::assemble(
            "company",
            listing,
            extraction,
            None,
            NaiveDate::from_ymd_opt(2024, 6, 8).unwrap(),
        )
    }

    #[test]
    fn test_row_matches_columns() {
        let row = sample().to_row();
        assert_eq!(row.len(), JobRecord::COLUMNS.len());
        assert_eq!(row[0], "company");
        assert_eq!(row[3], "Data Engineer");
        assert_eq!(row[5], r#"["SQL","Airflow"]"#);
        assert_eq!(row[12], "");
        assert_eq!(row[15], r#"["Data Science"]"#);
        assert_eq!(row[16], "2024-06-08");
    }

    #[test]
    fn test_serialized_keys_follow_column_order() {
        let value = serde_json::to_value(sample()).unwrap();
        let object = value.as_object().unwrap();

        for column in JobRecord::COLUMNS {
            assert!(object.contains_key(column), "missing column {}", column);
        }
        assert_eq!(object.len(), JobRecord::COLUMNS.len());
        assert_eq!(object["startDate"], serde_json::Value::Null);
        assert_eq!(object["expiresAt"], "2024-06-08");
    }
}
