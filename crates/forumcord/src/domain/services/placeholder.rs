//! Placeholder expansion
//!
//! User-supplied message templates may reference `{token}` placeholders
//! that expand to live profile attributes. Unknown tokens stay literal.

use std::collections::BTreeMap;

use crate::domain::services::markup;
use crate::ports::{TitleRank, UserProfile};

/// Separator for multi-value custom profile fields
const FIELD_VALUE_SEPARATOR: &str = ", ";

/// Build the token table for a user. `None` yields the guest table
/// (username "Guest", id 0, everything else empty).
pub fn build_tokens(
    profile: Option<&UserProfile>,
    ladder: &[TitleRank],
) -> BTreeMap<String, String> {
    let mut tokens = BTreeMap::new();

    let Some(profile) = profile else {
        tokens.insert("uid".to_string(), "0".to_string());
        tokens.insert("username".to_string(), "Guest".to_string());
        return tokens;
    };

    tokens.insert("uid".to_string(), profile.user_id.to_string());
    tokens.insert(
        "username".to_string(),
        if profile.username.is_empty() {
            "Guest".to_string()
        } else {
            profile.username.clone()
        },
    );
    tokens.insert("postnum".to_string(), format_count(profile.post_count));
    tokens.insert("threadnum".to_string(), format_count(profile.thread_count));

    if !profile.hide_email {
        tokens.insert("email".to_string(), profile.email.clone());
    }

    tokens.insert("group_title".to_string(), profile.group_title.clone());
    tokens.insert(
        "display_group_title".to_string(),
        profile.display_group_title.clone(),
    );
    tokens.insert("usertitle".to_string(), resolve_user_title(profile, ladder));
    tokens.insert(
        "signature".to_string(),
        markup::translate(&profile.signature, false),
    );
    tokens.insert("reputation".to_string(), profile.reputation.to_string());
    tokens.insert(
        "warning_level".to_string(),
        warning_indicator(profile.warning_points, profile.warning_max),
    );

    for field in &profile.custom_fields {
        if !field.visible {
            continue;
        }
        let key = format!(
            "field_{}",
            field.name.to_lowercase().replace(char::is_whitespace, "_")
        );
        tokens.insert(key, field.values.join(FIELD_VALUE_SEPARATOR));
    }

    tokens
}

/// Replace every literal `{token}` occurrence; unknown tokens untouched
pub fn expand(template: &str, tokens: &BTreeMap<String, String>) -> String {
    let mut out = template.to_string();
    for (key, value) in tokens {
        out = out.replace(&format!("{{{}}}", key), value);
    }
    out
}

/// Custom title, else display-group title, else the highest ladder rung
/// the post count clears (descending threshold, first match wins)
fn resolve_user_title(profile: &UserProfile, ladder: &[TitleRank]) -> String {
    if !profile.custom_title.is_empty() {
        return profile.custom_title.clone();
    }
    if !profile.display_group_title.is_empty() {
        return profile.display_group_title.clone();
    }

    let mut ranks: Vec<&TitleRank> = ladder.iter().collect();
    ranks.sort_by(|a, b| b.min_posts.cmp(&a.min_posts));
    ranks
        .into_iter()
        .find(|rank| profile.post_count >= rank.min_posts)
        .map(|rank| rank.title.clone())
        .unwrap_or_default()
}

/// Warning percentage, capped at 100, with a colored indicator
fn warning_indicator(points: i32, max: i32) -> String {
    if max <= 0 {
        return String::new();
    }
    let pct = ((points as i64 * 100) / max as i64).clamp(0, 100);
    let dot = match pct {
        0..=33 => "\u{1f7e2}",  // green
        34..=66 => "\u{1f7e1}", // yellow
        _ => "\u{1f534}",       // red
    };
    format!("{} {}%", dot, pct)
}

/// Locale-style counter formatting with thousands separators
fn format_count(n: i64) -> String {
    let digits = n.abs().to_string();
    let mut grouped = String::new();
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(c);
    }
    if n < 0 {
        format!("-{}", grouped)
    } else {
        grouped
    }
}
