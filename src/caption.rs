//! Share-caption formatting for resolved records

use crate::extract::MovieRecord;

/// Render the WhatsApp-style share caption for one record.
///
/// Unresolved fields are skipped rather than printed as "N/A", matching
/// how the captions circulate in forwarding groups.
pub fn whatsapp_caption(record: &MovieRecord) -> String {
    let mut out = String::new();
    out.push_str(&format!("\u{2618}\u{fe0f} \u{1d5e7}\u{1d5dc}\u{1d5e7}\u{1d5df}\u{1d5d8} \u{261b} {}", record.title));

    let meta = [
        ("\u{1f4c5} \u{1d5e5}\u{1d5d8}\u{1d5df}\u{1d5d8}\u{1d5d4}\u{1d5e6}\u{1d5d8} \u{1d5d7}\u{1d5d4}\u{1d5e7}\u{1d5d8}", &record.release_date),
        ("\u{1f30d} \u{1d5d6}\u{1d5e2}\u{1d5e8}\u{1d5e1}\u{1d5e7}\u{1d5e5}\u{1d5ec}", &record.country),
        ("\u{23f1}\u{fe0f} \u{1d5d7}\u{1d5e8}\u{1d5e5}\u{1d5d4}\u{1d5e7}\u{1d5dc}\u{1d5e2}\u{1d5e1}", &record.duration),
        ("\u{1f3ad} \u{1d5da}\u{1d5d8}\u{1d5e1}\u{1d5e5}\u{1d5d8}\u{1d5e6}", &record.genres),
    ];
    for (label, field) in meta {
        if let Some(value) = field.as_str() {
            out.push_str(&format!("\n\u{23f9}\u{fe0f} {} \u{261b} {}", label, value));
        }
    }

    let credits = [
        ("\u{1f468}\u{1f3fb}\u{200d}\u{1f4bc} \u{1d5d7}\u{1d5dc}\u{1d5e5}\u{1d5d8}\u{1d5d6}\u{1d5e7}\u{1d5e2}\u{1d5e5}", &record.director),
        ("\u{1f575}\u{fe0f} \u{1d5d6}\u{1d5d4}\u{1d5e6}\u{1d5e7}", &record.cast),
    ];
    let mut credit_lines = String::new();
    for (label, field) in credits {
        if let Some(value) = field.as_str() {
            credit_lines.push_str(&format!("\n\u{23f9}\u{fe0f} {} \u{261b} {}", label, value));
        }
    }
    if !credit_lines.is_empty() {
        out.push('\n');
        out.push_str(&credit_lines);
    }

    out.push_str(&format!(
        "\n\n\u{1f517} \u{1d5d7}\u{1d5fc}\u{1d604}\u{1d5fb}\u{1d5f9}\u{1d5fc}\u{1d5ee}\u{1d5f1}: {}",
        record.source_link
    ));
    out
}
