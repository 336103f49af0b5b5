//! Closed value sets used as parameters.

use serde::Serialize;

use crate::params::Choice;

/// Predefined model names accepted by `/models/{model_name}`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ModelName {
    Alexnet,
    Resnet,
    Lenet,
}

impl ModelName {
    pub fn blurb(self) -> &'static str {
        match self {
            ModelName::Alexnet => "Deep Learning FTW!",
            ModelName::Lenet => "LeCNN all the images",
            ModelName::Resnet => "Have some residuals",
        }
    }
}

impl Choice for ModelName {
    const VARIANTS: &'static [Self] = &[ModelName::Alexnet, ModelName::Resnet, ModelName::Lenet];

    fn as_str(self) -> &'static str {
        match self {
            ModelName::Alexnet => "alexnet",
            ModelName::Resnet => "resnet",
            ModelName::Lenet => "lenet",
        }
    }
}

/// Sort key for filtered listings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum OrderBy {
    #[default]
    CreatedAt,
    UpdatedAt,
}

impl Choice for OrderBy {
    const VARIANTS: &'static [Self] = &[OrderBy::CreatedAt, OrderBy::UpdatedAt];
    const LITERAL: bool = true;

    fn as_str(self) -> &'static str {
        match self {
            OrderBy::CreatedAt => "created_at",
            OrderBy::UpdatedAt => "updated_at",
        }
    }
}
