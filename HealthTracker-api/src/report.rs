use health_tracker_domain::entities::blood_pressure::BloodPressureReading;

/// Title shown at the top of the exported history
pub const REPORT_TITLE: &str = "Blood Pressure History";

const REPORT_STYLE: &str = "body { font-family: Arial, sans-serif; padding: 20px; }
h1 { color: #333; }
.report-table { width: 100%; border-collapse: collapse; margin-top: 20px; }
.report-table th, .report-table td { border: 1px solid #ddd; padding: 8px; font-size: 14px; }
.report-table th { background-color: #f2f2f2; text-align: left; }";

/// Escape text for use inside HTML elements and attributes
pub fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

fn cell(value: Option<&str>) -> String {
    escape_html(value.unwrap_or_default())
}

/// Render the reading history as a printable HTML document
pub fn render_report(readings: &[BloodPressureReading]) -> String {
    let rows: String = readings
        .iter()
        .map(|reading| {
            format!(
                "<tr><td>{}</td><td>{}</td><td>{}</td><td>{}</td></tr>\n",
                escape_html(&reading.created_at),
                cell(reading.systolic.as_deref()),
                cell(reading.diastolic.as_deref()),
                cell(reading.pulse.as_deref()),
            )
        })
        .collect();

    format!(
        "<!DOCTYPE html>
<html>
<head>
<meta charset=\"utf-8\">
<title>{title}</title>
<style>
{style}
</style>
</head>
<body>
<h1>{title}</h1>
<table class=\"report-table\">
<thead>
<tr><th>Date</th><th>Systolic (SYS)</th><th>Diastolic (DIA)</th><th>Pulse (PPM)</th></tr>
</thead>
<tbody>
{rows}</tbody>
</table>
</body>
</html>
",
        title = REPORT_TITLE,
        style = REPORT_STYLE,
        rows = rows,
    )
}
