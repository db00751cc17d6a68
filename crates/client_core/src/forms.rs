//! Form bindings: turning a submitted form into the request it stands for.

use shared::{
    domain::TodoId,
    error::FormError,
    protocol::{ClientRequest, CreateTodoRequest},
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormKind {
    NewTodo,
    UpdateStatus,
    DeleteTodo,
}

impl FormKind {
    pub const ALL: [FormKind; 3] = [Self::NewTodo, Self::UpdateStatus, Self::DeleteTodo];

    pub fn element_id(self) -> &'static str {
        match self {
            Self::NewTodo => "new-todo",
            Self::UpdateStatus => "update-status",
            Self::DeleteTodo => "delete-todo",
        }
    }

    /// Accepts the bare id or a `#id` selector.
    pub fn from_element_id(id: &str) -> Option<Self> {
        let id = id.strip_prefix('#').unwrap_or(id);
        Self::ALL.into_iter().find(|kind| kind.element_id() == id)
    }
}

/// Submitted field values in document order. Repeated names are allowed;
/// [`FormData::get`] returns the first one.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormData {
    fields: Vec<(String, String)>,
}

impl FormData {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.append(name, value);
        self
    }

    pub fn append(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.fields.push((name.into(), value.into()));
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.fields
            .iter()
            .find(|(field, _)| field == name)
            .map(|(_, value)| value.as_str())
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for FormData {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            fields: iter
                .into_iter()
                .map(|(name, value)| (name.into(), value.into()))
                .collect(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormSubmission {
    pub form: String,
    pub data: FormData,
}

impl FormSubmission {
    pub fn new(form: impl Into<String>, data: FormData) -> Self {
        Self {
            form: form.into(),
            data,
        }
    }

    pub fn for_kind(kind: FormKind, data: FormData) -> Self {
        Self::new(kind.element_id(), data)
    }
}

pub fn extract_request(submission: &FormSubmission) -> Result<ClientRequest, FormError> {
    let kind = FormKind::from_element_id(&submission.form)
        .ok_or_else(|| FormError::UnknownForm(submission.form.clone()))?;
    let data = &submission.data;

    match kind {
        FormKind::NewTodo => {
            let title = data.get("title").ok_or(FormError::MissingField("title"))?;
            Ok(ClientRequest::CreateTodo(CreateTodoRequest {
                title: title.to_string(),
                description: data.get("description").map(str::to_string),
            }))
        }
        FormKind::UpdateStatus => Ok(ClientRequest::MarkCompleted {
            id: id_field(data)?,
        }),
        FormKind::DeleteTodo => Ok(ClientRequest::DeleteTodo {
            id: id_field(data)?,
        }),
    }
}

fn id_field(data: &FormData) -> Result<TodoId, FormError> {
    let raw = data.get("id").ok_or(FormError::MissingField("id"))?;
    coerce_id(raw)
}

/// Numeric coercion of an `id` field: whitespace is ignored, a blank value is
/// zero, and integral decimals such as `"5.0"` are accepted.
pub fn coerce_id(raw: &str) -> Result<TodoId, FormError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Ok(TodoId(0));
    }
    if let Ok(id) = trimmed.parse::<i64>() {
        return Ok(TodoId(id));
    }

    match trimmed.parse::<f64>() {
        Ok(value)
            if value.is_finite()
                && value.fract() == 0.0
                && value >= i64::MIN as f64
                && value < i64::MAX as f64 =>
        {
            Ok(TodoId(value as i64))
        }
        _ => Err(FormError::InvalidId(raw.to_string())),
    }
}
