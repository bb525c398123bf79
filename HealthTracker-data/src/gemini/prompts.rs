/// MIME type of the photo sent for extraction
pub const IMAGE_MIME_TYPE: &str = "image/jpeg";

/// MIME type requested for the model's reply
pub const RESPONSE_MIME_TYPE: &str = "application/json";

/// Instruction sent alongside the photo of the monitor
pub const EXTRACT_BLOOD_PRESSURE_PROMPT: &str = r#"Your task is to analyze the image of a blood pressure monitor and extract the key medical readings. Transcribe only the numerical values for systolic pressure, diastolic pressure, and pulse.
Return the output exclusively in JSON format with the following structure:

{
  "systolic": NUMBER,
  "diastolic": NUMBER,
  "pulse": NUMBER
}

If a value cannot be determined from the image, use null as the value in the JSON. Do not include any additional explanation outside of the JSON object."#;
