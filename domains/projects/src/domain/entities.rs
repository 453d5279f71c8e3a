//! Domain entities for the Projects domain
//!
//! A project record always owns exactly one banner image hosted by the media
//! store. Records serialize with the camelCase keys the portfolio front-end
//! reads.

use std::path::PathBuf;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use portfolio_common::{Error, Result};
use portfolio_media::UploadedAsset;

/// Logical media folder every project banner is uploaded into
pub const BANNER_FOLDER: &str = "PORTFOLIO PROJECT IMAGES";

pub const BANNER_REQUIRED: &str = "Project Banner Image Required!";
pub const DETAILS_REQUIRED: &str = "Please Provide All Details!";
pub const PROJECT_NOT_FOUND: &str = "Project not found!";

/// Reference to a banner asset held by the media store
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Banner {
    #[serde(rename = "public_id")]
    pub asset_id: String,
    pub url: String,
}

impl From<UploadedAsset> for Banner {
    fn from(asset: UploadedAsset) -> Self {
        Self {
            asset_id: asset.asset_id,
            url: asset.secure_url,
        }
    }
}

/// Project entity
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Project {
    pub id: Uuid,
    pub title: String,
    pub description: String,
    pub git_repo_link: String,
    pub project_link: String,
    pub stack: String,
    pub technologies: String,
    pub deployed: String,
    #[serde(rename = "projectBanner")]
    pub banner: Banner,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Scalar project attributes as submitted by a client.
///
/// Absent fields are `None`. On create every field is required; on update
/// absent fields are left untouched but supplied ones must not be blank.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct ProjectFields {
    #[validate(length(min = 1, message = "Project title cannot be empty"))]
    pub title: Option<String>,
    #[validate(length(min = 1, message = "Project description cannot be empty"))]
    pub description: Option<String>,
    #[validate(length(min = 1, message = "Project gitRepoLink cannot be empty"))]
    pub git_repo_link: Option<String>,
    #[validate(length(min = 1, message = "Project projectLink cannot be empty"))]
    pub project_link: Option<String>,
    #[validate(length(min = 1, message = "Project stack cannot be empty"))]
    pub stack: Option<String>,
    #[validate(length(min = 1, message = "Project technologies cannot be empty"))]
    pub technologies: Option<String>,
    #[validate(length(min = 1, message = "Project deployed cannot be empty"))]
    pub deployed: Option<String>,
}

/// Create-time view of [`ProjectFields`]: every attribute is mandatory
#[derive(Debug, Validate)]
struct RequiredFields {
    #[validate(required, length(min = 1))]
    title: Option<String>,
    #[validate(required, length(min = 1))]
    description: Option<String>,
    #[validate(required, length(min = 1))]
    git_repo_link: Option<String>,
    #[validate(required, length(min = 1))]
    project_link: Option<String>,
    #[validate(required, length(min = 1))]
    stack: Option<String>,
    #[validate(required, length(min = 1))]
    technologies: Option<String>,
    #[validate(required, length(min = 1))]
    deployed: Option<String>,
}

impl From<ProjectFields> for RequiredFields {
    fn from(fields: ProjectFields) -> Self {
        Self {
            title: fields.title,
            description: fields.description,
            git_repo_link: fields.git_repo_link,
            project_link: fields.project_link,
            stack: fields.stack,
            technologies: fields.technologies,
            deployed: fields.deployed,
        }
    }
}

impl ProjectFields {
    /// Wire names of the scalar fields, in declaration order
    pub const NAMES: [&'static str; 7] = [
        "title",
        "description",
        "gitRepoLink",
        "projectLink",
        "stack",
        "technologies",
        "deployed",
    ];

    /// Struct field names, parallel to [`Self::NAMES`]
    const FIELDS: [&'static str; 7] = [
        "title",
        "description",
        "git_repo_link",
        "project_link",
        "stack",
        "technologies",
        "deployed",
    ];

    /// Assign a field by its wire name. Returns `false` for unknown names.
    pub fn set(&mut self, name: &str, value: String) -> bool {
        let slot = match name {
            "title" => &mut self.title,
            "description" => &mut self.description,
            "gitRepoLink" => &mut self.git_repo_link,
            "projectLink" => &mut self.project_link,
            "stack" => &mut self.stack,
            "technologies" => &mut self.technologies,
            "deployed" => &mut self.deployed,
            _ => return false,
        };
        *slot = Some(value);
        true
    }

    /// Whether no field was supplied at all
    pub fn is_empty(&self) -> bool {
        [
            &self.title,
            &self.description,
            &self.git_repo_link,
            &self.project_link,
            &self.stack,
            &self.technologies,
            &self.deployed,
        ]
        .iter()
        .all(|value| value.is_none())
    }

    /// Require every field to be present and non-empty
    pub fn into_details(self) -> Result<ProjectDetails> {
        let fields = RequiredFields::from(self);
        fields
            .validate()
            .map_err(|_| Error::Validation(DETAILS_REQUIRED.to_string()))?;

        Ok(ProjectDetails {
            title: fields.title.unwrap_or_default(),
            description: fields.description.unwrap_or_default(),
            git_repo_link: fields.git_repo_link.unwrap_or_default(),
            project_link: fields.project_link.unwrap_or_default(),
            stack: fields.stack.unwrap_or_default(),
            technologies: fields.technologies.unwrap_or_default(),
            deployed: fields.deployed.unwrap_or_default(),
        })
    }

    /// Reject supplied fields that would blank out a required attribute.
    /// The first offending field in declaration order is reported.
    pub fn validate_changes(&self) -> Result<()> {
        self.validate().map_err(|errors| {
            let field_errors = errors.field_errors();
            let message = Self::FIELDS
                .iter()
                .filter_map(|name| field_errors.get(*name))
                .flat_map(|errs| errs.iter())
                .find_map(|err| err.message.as_ref())
                .map(|msg| msg.to_string())
                .unwrap_or_else(|| format!("Validation failed: {}", errors));
            Error::Validation(message)
        })
    }
}

/// Complete, validated set of scalar attributes
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectDetails {
    pub title: String,
    pub description: String,
    pub git_repo_link: String,
    pub project_link: String,
    pub stack: String,
    pub technologies: String,
    pub deployed: String,
}

/// A record ready to be persisted; the store assigns the id
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewProject {
    pub details: ProjectDetails,
    pub banner: Banner,
}

/// Partial update applied by the store
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProjectUpdate {
    pub fields: ProjectFields,
    pub banner: Option<Banner>,
}

impl ProjectUpdate {
    /// Apply this update to an in-memory record
    pub fn apply_to(&self, project: &mut Project) {
        let ProjectFields {
            title,
            description,
            git_repo_link,
            project_link,
            stack,
            technologies,
            deployed,
        } = &self.fields;

        let assignments = [
            (&mut project.title, title),
            (&mut project.description, description),
            (&mut project.git_repo_link, git_repo_link),
            (&mut project.project_link, project_link),
            (&mut project.stack, stack),
            (&mut project.technologies, technologies),
            (&mut project.deployed, deployed),
        ];
        for (target, value) in assignments {
            if let Some(value) = value {
                target.clone_from(value);
            }
        }

        if let Some(banner) = &self.banner {
            project.banner = banner.clone();
        }
        project.updated_at = Utc::now();
    }
}

/// A banner image spooled to local disk, ready to be handed to the media store
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BannerFile {
    pub path: PathBuf,
    pub size_bytes: u64,
}

impl BannerFile {
    pub fn new(path: impl Into<PathBuf>, size_bytes: u64) -> Self {
        Self {
            path: path.into(),
            size_bytes,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.size_bytes == 0
    }
}

/// Parse a path identifier. A malformed id cannot name a record, so it is
/// reported the same way as an unknown one.
pub fn parse_project_id(raw: &str) -> Result<Uuid> {
    Uuid::parse_str(raw).map_err(|_| Error::NotFound(PROJECT_NOT_FOUND.to_string()))
}
