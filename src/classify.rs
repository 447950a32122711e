//! System-event and media-placeholder classification.
//!
//! Exports mix user content with platform events (group management, calls,
//! encryption notices, deletions, invite joins) and with placeholders for
//! media that was left out of the export. Neither carries a schema, so both
//! are recognized by phrase lists.
//!
//! - [`is_system_content`] runs once on the fully assembled message, since a
//!   continuation line can complete an indicator phrase.
//! - [`is_media_line`] runs on each line during tokenization and the results
//!   are OR-combined.

/// Platform event phrases, matched against normalized (lowercase,
/// whitespace-collapsed) content.
const SYSTEM_INDICATORS: &[&str] = &[
    // Encryption
    "messages and calls are end-to-end encrypted",
    "security code changed",
    "your security code with",
    // Group management
    "created group",
    "created this group",
    "changed the subject",
    "changed this group's icon",
    "changed the group description",
    "deleted this group's icon",
    "changed their phone number",
    "changed the group settings",
    "you're now an admin",
    "is now an admin",
    "no longer an admin",
    "added you",
    "removed you",
    "you were added",
    "you were removed",
    "left the group",
    "turned on disappearing messages",
    "turned off disappearing messages",
    // Invite joins
    "joined using this group's invite link",
    "joined using an invite link",
    "joined from the community",
    // Calls
    "missed voice call",
    "missed video call",
    "missed group voice call",
    "missed group video call",
    // Deletions
    "this message was deleted",
    "you deleted this message",
    "waiting for this message",
    // Russian
    "сообщения и звонки защищены сквозным шифрованием",
    "создал(а) группу",
    "изменил(а) тему",
    "изменил(а) описание группы",
    "присоединился по ссылке",
    "код безопасности изменён",
    "теперь администратор",
    "пропущенный звонок",
    "пропущенный видеозвонок",
    "данное сообщение удалено",
    "вы удалили данное сообщение",
];

/// Media-omission placeholders and attachment markers, matched
/// case-insensitively.
const MEDIA_MARKERS: &[&str] = &[
    "<media omitted>",
    "image omitted",
    "video omitted",
    "audio omitted",
    "sticker omitted",
    "gif omitted",
    "document omitted",
    "contact card omitted",
    "<attached:",
    "(file attached)",
    "<без медиафайлов>",
    "изображение отсутствует",
    "видео отсутствует",
    "аудиофайл отсутствует",
    "стикер отсутствует",
];

/// Zero-width and directional marks that exports sprinkle into event lines.
fn is_invisible(c: char) -> bool {
    matches!(
        c,
        '\u{200B}'..='\u{200F}' | '\u{202A}'..='\u{202E}' | '\u{2060}' | '\u{FEFF}'
    )
}

/// Strips zero-width marks, collapses whitespace runs and lowercases.
pub fn normalize(content: &str) -> String {
    content
        .chars()
        .filter(|&c| !is_invisible(c))
        .collect::<String>()
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .to_lowercase()
}

/// Returns `true` if the assembled content describes a platform event.
pub fn is_system_content(content: &str) -> bool {
    let normalized = normalize(content);

    if SYSTEM_INDICATORS
        .iter()
        .any(|indicator| normalized.contains(indicator))
    {
        return true;
    }

    let has_call = normalized.contains("call");
    (has_call && normalized.contains("missed"))
        || (has_call && (normalized.contains("voice") || normalized.contains("video")))
}

/// Returns `true` if a single line carries a media placeholder.
pub fn is_media_line(line: &str) -> bool {
    let lower = line.to_lowercase();
    MEDIA_MARKERS.iter().any(|marker| lower.contains(marker))
}
