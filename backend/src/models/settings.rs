//! Per-user settings blob.
//!
//! Settings are stored as one opaque JSON object per user; the server only
//! checks that the top level is an object.

use serde_json::{json, Value};

/// Settings given to a freshly seeded account.
pub fn default_settings() -> Value {
    json!({
        "profile": {
            "name": "Jennifer Adams",
            "email": "jennifer.adams@montessori.edu",
            "phone": "(555) 123-4567",
            "bio": "Certified Montessori teacher with 8 years of experience in primary education."
        },
        "classroom": {
            "school_name": "Willow Creek Montessori",
            "classroom_name": "Primary A (Ages 3-6)",
            "academic_year": "2025-2026",
            "student_count": 18,
            "assistant_teachers": ["Maria Garcia", "David Chen"]
        },
        "notifications": {
            "email_observations": true,
            "email_reports": true,
            "email_parent_communications": true,
            "push_activities": true,
            "push_schedule_changes": true,
            "weekly_digest": true,
            "reminder_time": "18:00:00"
        },
        "privacy_security": {
            "two_factor_auth": false,
            "session_timeout": 30,
            "data_export": true,
            "share_progress_with_parents": true,
            "analytics_tracking": true
        },
        "appearance": {
            "theme": "light",
            "accent_color": "Purple",
            "font_size": "Medium",
            "compact_mode": false,
            "sidebar_collapsed": false
        }
    })
}
