//! JSON Schemas for the two catalog response bodies.
//!
//! Bodies are checked against these before typed decoding, so a shape change
//! upstream fails at the client boundary with a path to the offending value
//! instead of surfacing later as a missing field in view code.

use jsonschema::JSONSchema;
use once_cell::sync::Lazy;
use serde_json::{json, Value};

use crate::common::error::{CatalogError, Result};

static PAGE_SCHEMA: Lazy<Value> = Lazy::new(|| {
    json!({
        "$schema": "http://json-schema.org/draft-07/schema#",
        "title": "collection page",
        "type": "object",
        "required": ["results"],
        "properties": {
            "count": { "type": "integer", "minimum": 0 },
            "next": { "type": ["string", "null"] },
            "previous": { "type": ["string", "null"] },
            "results": {
                "type": "array",
                "items": {
                    "type": "object",
                    "required": ["name", "url"],
                    "properties": {
                        "id": { "type": "integer", "minimum": 0 },
                        "name": { "type": "string", "minLength": 1 },
                        "url": { "type": "string" }
                    }
                }
            }
        }
    })
});

static DETAIL_SCHEMA: Lazy<Value> = Lazy::new(|| {
    json!({
        "$schema": "http://json-schema.org/draft-07/schema#",
        "title": "item details",
        "type": "object",
        "required": ["id", "name", "base_experience", "height", "weight", "sprites", "types"],
        "properties": {
            "id": { "type": "integer", "minimum": 0 },
            "name": { "type": "string", "minLength": 1 },
            "base_experience": { "type": ["integer", "null"], "minimum": 0 },
            "height": { "type": "integer", "minimum": 0 },
            "weight": { "type": "integer", "minimum": 0 },
            "sprites": {
                "type": "object",
                "properties": {
                    "front_default": { "type": ["string", "null"] }
                }
            },
            "types": {
                "type": "array",
                "items": {
                    "type": "object",
                    "required": ["type"],
                    "properties": {
                        "slot": { "type": "integer" },
                        "type": {
                            "type": "object",
                            "required": ["name"],
                            "properties": {
                                "name": { "type": "string" }
                            }
                        }
                    }
                }
            }
        }
    })
});

/// Compiled validators for the page and detail bodies.
pub struct ResponseSchemas {
    page: JSONSchema,
    detail: JSONSchema,
}

impl ResponseSchemas {
    pub fn compile() -> Result<Self> {
        let page = JSONSchema::compile(&PAGE_SCHEMA)
            .map_err(|e| CatalogError::Config(format!("page schema does not compile: {}", e)))?;
        let detail = JSONSchema::compile(&DETAIL_SCHEMA)
            .map_err(|e| CatalogError::Config(format!("detail schema does not compile: {}", e)))?;
        Ok(Self { page, detail })
    }

    pub fn check_page(&self, instance: &Value) -> std::result::Result<(), String> {
        check(&self.page, instance)
    }

    pub fn check_detail(&self, instance: &Value) -> std::result::Result<(), String> {
        check(&self.detail, instance)
    }
}

fn check(schema: &JSONSchema, instance: &Value) -> std::result::Result<(), String> {
    match schema.validate(instance) {
        Ok(()) => Ok(()),
        Err(errors) => {
            let details = errors
                .map(|err| format!("{} at '{}'", err, err.instance_path))
                .collect::<Vec<_>>()
                .join("; ");
            Err(details)
        }
    }
}
