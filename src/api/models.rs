//! Record types decoded from the remote service
//!
//! Field names follow the service's JSON (`userId`, `postId`, `catchPhrase`);
//! everything we don't display is ignored on decode.

use serde::{Deserialize, Serialize};

/// A selectable employee (populates the selector)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Employee {
    pub id: u64,
    pub name: String,
}

/// A post owned by one employee
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Post {
    pub id: u64,
    #[serde(rename = "userId")]
    pub employee_id: u64,
    pub title: String,
    pub body: String,
}

/// Company block nested inside a user record
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Company {
    pub name: String,
    #[serde(rename = "catchPhrase", default)]
    pub catch_phrase: String,
}

/// Author metadata for a post, fetched at render time
///
/// Same remote resource as [`Employee`], decoded with the company block.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Author {
    pub id: u64,
    pub name: String,
    #[serde(default)]
    pub company: Company,
}

impl Author {
    /// "Author: {name} with {company}"
    pub fn summary(&self) -> String {
        format!("Author: {} with {}", self.name, self.company.name)
    }
}

/// A comment attached to one post
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Comment {
    #[serde(rename = "postId")]
    pub post_id: u64,
    pub name: String,
    pub body: String,
    pub email: String,
}
