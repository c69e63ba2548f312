pub const DEFAULT_ICON: &str = "📌";

// Matched top to bottom with a case-insensitive substring test, so patterns
// that contain another pattern ("ready for qa" contains "qa") must come first.
const ICON_RULES: &[(&str, &str)] = &[
    ("ready for work", "📋"),
    ("ready for dev", "📋"),
    ("ready for qa", "🧪"),
    ("ready for test", "🧪"),
    ("ready for uat", "🎯"),
    ("in progress", "🔨"),
    ("in development", "🔨"),
    ("in review", "👀"),
    ("in qa", "🧪"),
    ("in uat", "🎯"),
    ("peer review", "👀"),
    ("code review", "👀"),
    ("user acceptance", "🎯"),
    ("to do", "📋"),
    ("todo", "📋"),
    ("backlog", "📋"),
    ("working", "🔨"),
    ("testing", "🧪"),
    ("waiting", "⏳"),
    ("on hold", "⏸️"),
    ("blocked", "🚫"),
    ("done", "✅"),
    ("completed", "✅"),
    ("closed", "✅"),
    ("resolved", "✅"),
    ("review", "👀"),
    ("qa", "🧪"),
    ("uat", "🎯"),
    ("dev", "🔨"),
];

pub fn icon_for(status: &str) -> &'static str {
    let status = status.to_lowercase();
    ICON_RULES
        .iter()
        .find(|(pattern, _)| status.contains(pattern))
        .map(|(_, icon)| *icon)
        .unwrap_or(DEFAULT_ICON)
}
