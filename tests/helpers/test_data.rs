//! Test data helpers for creating request payloads
//!
//! Submission bodies are filled with `fake` data; multipart bodies for the
//! news endpoint are assembled by hand.

use fake::faker::internet::en::SafeEmail;
use fake::faker::lorem::en::{Sentence, Words};
use fake::faker::name::en::Name;
use fake::Fake;
use serde_json::{json, Value};

const BOUNDARY: &str = "admissions-test-boundary";

/// Smallest valid PNG header, enough for a stored image
pub const PNG_BYTES: &[u8] = &[0x89, b'P', b'N', b'G', 0x0D, 0x0A, 0x1A, 0x0A, 0, 0, 0, 0];

/// Admission enquiry with the given email
pub fn admin_lead_payload(email: &str) -> Value {
    let name: String = Name().fake();
    json!({
        "name": name,
        "phone": 9876543210u64,
        "email": email,
        "program": "B.Sc. Computer Science",
    })
}

/// Admission enquiry with a random email
pub fn random_admin_lead() -> Value {
    let email: String = SafeEmail().fake();
    admin_lead_payload(&email)
}

pub fn applicant_payload() -> Value {
    let full_name: String = Name().fake();
    let father_name: String = Name().fake();
    let mother_name: String = Name().fake();
    json!({
        "fullName": full_name,
        "dob": "2006-08-21",
        "gender": "Female",
        "category": "General",
        "fatherName": father_name,
        "motherName": mother_name,
        "previousSchool": "Government Senior Secondary School",
        "course": "B.Com",
    })
}

pub fn contact_message_payload() -> Value {
    let name: String = Name().fake();
    let email: String = SafeEmail().fake();
    let subject: Vec<String> = Words(2..5).fake();
    let message: String = Sentence(5..12).fake();
    json!({
        "name": name,
        "email": email,
        "subject": subject.join(" "),
        "message": message,
    })
}

/// One part of a multipart/form-data body
#[derive(Debug, Clone)]
pub enum MultipartPart {
    Text {
        name: String,
        value: String,
    },
    File {
        name: String,
        file_name: String,
        content_type: String,
        bytes: Vec<u8>,
    },
}

impl MultipartPart {
    pub fn text(name: &str, value: &str) -> Self {
        MultipartPart::Text {
            name: name.to_string(),
            value: value.to_string(),
        }
    }

    pub fn file(name: &str, file_name: &str, content_type: &str, bytes: &[u8]) -> Self {
        MultipartPart::File {
            name: name.to_string(),
            file_name: file_name.to_string(),
            content_type: content_type.to_string(),
            bytes: bytes.to_vec(),
        }
    }
}

/// Title, description and a PNG image
pub fn news_parts(title: &str) -> Vec<MultipartPart> {
    vec![
        MultipartPart::text("title", title),
        MultipartPart::text("description", "Admissions for the new session are open"),
        MultipartPart::file("image", "banner.png", "image/png", PNG_BYTES),
    ]
}

/// Encode parts as multipart/form-data, returning the content type and body
pub fn multipart_body(parts: &[MultipartPart]) -> (String, Vec<u8>) {
    let mut body = Vec::new();

    for part in parts {
        body.extend_from_slice(format!("--{BOUNDARY}\r\n").as_bytes());
        match part {
            MultipartPart::Text { name, value } => {
                body.extend_from_slice(
                    format!("Content-Disposition: form-data; name=\"{name}\"\r\n\r\n").as_bytes(),
                );
                body.extend_from_slice(value.as_bytes());
            }
            MultipartPart::File {
                name,
                file_name,
                content_type,
                bytes,
            } => {
                body.extend_from_slice(
                    format!(
                        "Content-Disposition: form-data; name=\"{name}\"; filename=\"{file_name}\"\r\n\
                         Content-Type: {content_type}\r\n\r\n"
                    )
                    .as_bytes(),
                );
                body.extend_from_slice(bytes);
            }
        }
        body.extend_from_slice(b"\r\n");
    }
    body.extend_from_slice(format!("--{BOUNDARY}--\r\n").as_bytes());

    (format!("multipart/form-data; boundary={BOUNDARY}"), body)
}
