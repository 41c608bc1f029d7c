#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    /// `id` is kept as sent by the client, which may not be a valid [`DbId`].
    ///
    /// [`DbId`]: crate::types::DbId
    #[error("Entity not found: {entity} with id {id}")]
    NotFound { entity: &'static str, id: String },

    #[error("Validation failed: {0}")]
    Validation(String),

    /// The question store could not complete a read or write.
    #[error("Store unavailable: {0}")]
    StoreUnavailable(String),

    /// A batched reorder did not land as a whole.
    #[error("Reorder failed: {0}")]
    ReorderFailed(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl From<validator::ValidationErrors> for CoreError {
    fn from(errors: validator::ValidationErrors) -> Self {
        let mut messages: Vec<String> = errors
            .field_errors()
            .into_iter()
            .flat_map(|(field, errs)| {
                errs.iter().map(move |e| match &e.message {
                    Some(msg) => msg.to_string(),
                    None => format!("{field} is invalid"),
                })
            })
            .collect();

        // Nested option errors are reported under `options[i].text`.
        for (field, kind) in errors.errors() {
            if let validator::ValidationErrorsKind::List(items) = kind {
                for (index, nested) in items {
                    for (sub_field, errs) in nested.field_errors() {
                        for e in errs {
                            let msg = e
                                .message
                                .as_ref()
                                .map(|m| m.to_string())
                                .unwrap_or_else(|| "is invalid".to_string());
                            messages.push(format!("{field}[{index}].{sub_field}: {msg}"));
                        }
                    }
                }
            }
        }

        messages.sort();
        CoreError::Validation(messages.join("; "))
    }
}
