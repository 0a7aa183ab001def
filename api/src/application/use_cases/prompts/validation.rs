use crate::application::errors::ServiceError;

pub const TITLE_MAX_CHARS: usize = 200;
pub const DESCRIPTION_MAX_CHARS: usize = 500;

pub fn validate_title(title: &str) -> Result<(), ServiceError> {
    if title.trim().is_empty() {
        return Err(ServiceError::validation("title must not be empty"));
    }
    if title.chars().count() > TITLE_MAX_CHARS {
        return Err(ServiceError::validation(format!(
            "title must be at most {TITLE_MAX_CHARS} characters"
        )));
    }
    Ok(())
}

pub fn validate_content(content: &str) -> Result<(), ServiceError> {
    if content.is_empty() {
        return Err(ServiceError::validation("content must not be empty"));
    }
    Ok(())
}

pub fn validate_description(description: Option<&str>) -> Result<(), ServiceError> {
    match description {
        Some(d) if d.chars().count() > DESCRIPTION_MAX_CHARS => Err(ServiceError::validation(
            format!("description must be at most {DESCRIPTION_MAX_CHARS} characters"),
        )),
        _ => Ok(()),
    }
}
