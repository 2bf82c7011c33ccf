//! The schema-driven product form and its three submission flows.
//!
//! The form itself is plain state: values, touched flags and validation
//! derived from the field schema. `FormService` drives the create,
//! update and delete flows against the product API. Invalid forms never
//! reach the network; the update flow checks existence before writing.

use tracing::{error, info};

use crate::api::product_api::ProductApi;
use crate::models::schema_model::{FieldSchema, FieldValue, FormValues};
use crate::validation::{validate_field, ValidationError};

/// Field name the update and delete flows key on.
const NAME_FIELD: &str = "name";

/// One form control: its schema, current value and touched flag.
#[derive(Debug, Clone)]
pub struct FormField {
    schema: FieldSchema,
    value: FieldValue,
    touched: bool,
}

impl FormField {
    pub fn schema(&self) -> &FieldSchema {
        &self.schema
    }

    pub fn value(&self) -> &FieldValue {
        &self.value
    }

    /// The validation error to display: only once the field was touched.
    pub fn visible_error(&self) -> Option<ValidationError> {
        if !self.touched {
            return None;
        }
        validate_field(&self.schema, &self.value).err()
    }
}

/// A product form built from the external field schema.
#[derive(Debug, Clone)]
pub struct ProductForm {
    fields: Vec<FormField>,
}

impl ProductForm {
    /// Build a blank form: text and number fields start empty, checkboxes
    /// unchecked, nothing touched.
    pub fn from_schema(schema: &[FieldSchema]) -> Self {
        let fields = schema
            .iter()
            .map(|field| FormField {
                value: FieldValue::default_for(field.field_type),
                schema: field.clone(),
                touched: false,
            })
            .collect();
        Self { fields }
    }

    pub fn fields(&self) -> &[FormField] {
        &self.fields
    }

    /// Set a field's value and mark it touched. Returns false when the
    /// schema has no such field.
    pub fn set_value(&mut self, name: &str, value: FieldValue) -> bool {
        match self.fields.iter_mut().find(|field| field.schema.name == name) {
            Some(field) => {
                field.value = value;
                field.touched = true;
                true
            }
            None => false,
        }
    }

    pub fn value(&self, name: &str) -> Option<&FieldValue> {
        self.fields
            .iter()
            .find(|field| field.schema.name == name)
            .map(|field| &field.value)
    }

    /// Text content of a field, empty for checkboxes.
    pub fn text_value(&self, name: &str) -> &str {
        self.value(name).and_then(FieldValue::as_text).unwrap_or("")
    }

    /// Whether every field passes its schema rules.
    pub fn is_valid(&self) -> bool {
        self.fields
            .iter()
            .all(|field| validate_field(&field.schema, &field.value).is_ok())
    }

    /// Mark every field touched so all validation errors become visible.
    pub fn mark_all_touched(&mut self) {
        for field in &mut self.fields {
            field.touched = true;
        }
    }

    /// Back to the blank state: default values, nothing touched.
    pub fn reset(&mut self) {
        for field in &mut self.fields {
            field.value = FieldValue::default_for(field.schema.field_type);
            field.touched = false;
        }
    }

    /// The submission payload, keyed by field name.
    pub fn values(&self) -> FormValues {
        self.fields
            .iter()
            .map(|field| (field.schema.name.clone(), field.value.clone()))
            .collect()
    }

    /// All currently visible errors, paired with the field name.
    pub fn visible_errors(&self) -> Vec<(&str, ValidationError)> {
        self.fields
            .iter()
            .filter_map(|field| {
                field
                    .visible_error()
                    .map(|err| (field.schema.name.as_str(), err))
            })
            .collect()
    }
}

/// End state of the create flow.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CreateOutcome {
    /// Validation failed; every field is now touched, nothing was sent.
    Invalid,
    /// The API accepted the product and the form was reset.
    Created,
    /// The API call failed; details went to the log.
    Failed,
}

/// End state of the update flow.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UpdateOutcome {
    /// Validation failed; every field is now touched, nothing was sent.
    Invalid,
    /// The product exists and the update went through; form reset.
    Updated,
    /// No product under that name; no update request was made.
    NotFound,
    /// The existence check failed for a reason other than 404.
    CheckFailed,
    /// The product exists but the update request failed.
    UpdateFailed,
}

impl UpdateOutcome {
    /// The message shown to the operator for this outcome, if any.
    pub fn alert(&self) -> Option<&'static str> {
        match self {
            UpdateOutcome::Invalid => None,
            UpdateOutcome::Updated => Some("Product updated successfully."),
            UpdateOutcome::NotFound => Some("Product not found. Please create it first."),
            UpdateOutcome::CheckFailed => Some("An unexpected error occurred."),
            UpdateOutcome::UpdateFailed => Some("Failed to update product."),
        }
    }
}

/// End state of the delete flow.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeleteOutcome {
    /// The name field was empty; no request was made.
    MissingName,
    /// The operator declined the confirmation; no request was made.
    Cancelled,
    /// The product was removed and the form reset.
    Deleted,
    /// No product under that name.
    NotFound,
    /// The delete request failed for a reason other than 404.
    Failed,
}

impl DeleteOutcome {
    /// The message shown to the operator for this outcome, if any.
    pub fn alert(&self) -> Option<&'static str> {
        match self {
            DeleteOutcome::MissingName => Some("Please enter a product name to delete."),
            DeleteOutcome::Cancelled => None,
            DeleteOutcome::Deleted => Some("Product deleted successfully."),
            DeleteOutcome::NotFound => Some("Product not found."),
            DeleteOutcome::Failed => Some("Failed to delete product."),
        }
    }
}

/// Drives the submission flows over a built form.
pub struct FormService {
    api: ProductApi,
}

impl FormService {
    pub fn new(api: ProductApi) -> Self {
        Self { api }
    }

    /// Create flow: validate, then `POST /products` with the raw values.
    pub async fn submit_create(&self, form: &mut ProductForm) -> CreateOutcome {
        if !form.is_valid() {
            info!("Form not valid");
            form.mark_all_touched();
            return CreateOutcome::Invalid;
        }
        match self.api.create_product(&form.values()).await {
            Ok(response) => {
                info!("Product created: {}", response);
                form.reset();
                CreateOutcome::Created
            }
            Err(err) => {
                error!("Error creating product: {}", err);
                CreateOutcome::Failed
            }
        }
    }

    /// Update flow: validate, look the product up by name, and only
    /// `PUT` when it exists. A 404 on the lookup never issues the update.
    pub async fn submit_update(&self, form: &mut ProductForm) -> UpdateOutcome {
        if !form.is_valid() {
            info!("Form not valid");
            form.mark_all_touched();
            return UpdateOutcome::Invalid;
        }
        let name = form.text_value(NAME_FIELD).to_string();
        match self.api.get_product(&name).await {
            Ok(_) => {}
            Err(err) if err.is_not_found() => return UpdateOutcome::NotFound,
            Err(err) => {
                error!("Error checking product existence: {}", err);
                return UpdateOutcome::CheckFailed;
            }
        }
        match self.api.update_product(&name, &form.values()).await {
            Ok(response) => {
                info!("Product updated: {}", response);
                form.reset();
                UpdateOutcome::Updated
            }
            Err(err) => {
                error!("Error updating product: {}", err);
                UpdateOutcome::UpdateFailed
            }
        }
    }

    /// Delete flow, keyed on the form's name field. `confirm` is only
    /// consulted when there is a name to delete, and a declined
    /// confirmation makes no request at all.
    pub async fn delete(
        &self,
        form: &mut ProductForm,
        confirm: impl FnOnce(&str) -> bool,
    ) -> DeleteOutcome {
        let name = form.text_value(NAME_FIELD).to_string();
        if name.is_empty() {
            return DeleteOutcome::MissingName;
        }
        if !confirm(&name) {
            return DeleteOutcome::Cancelled;
        }
        match self.api.delete_product(&name).await {
            Ok(()) => {
                info!("Product deleted: {}", name);
                form.reset();
                DeleteOutcome::Deleted
            }
            Err(err) => {
                error!("Error deleting product: {}", err);
                if err.is_not_found() {
                    DeleteOutcome::NotFound
                } else {
                    DeleteOutcome::Failed
                }
            }
        }
    }
}
