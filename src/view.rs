//! Pure rendering of card state to markup. No state changes, no I/O.
use crate::card::TweetCard;
use crate::remote::{BlobStore, CurrentUser, RecordStore};

/// Render the card as a markup fragment.
///
/// Owner-only controls (delete, edit/save) appear iff the current user owns
/// the post. The body is a bounded textarea while editing, static text
/// otherwise. The photo column shows the current display photo and, while
/// editing, the pick/cancel controls.
pub fn render<R, B, U>(card: &TweetCard<R, B, U>) -> String
where
    R: RecordStore,
    B: BlobStore,
    U: CurrentUser,
{
    let post = card.post();
    let mut out = String::new();

    out.push_str("<article class=\"tweet\">");

    out.push_str("<div class=\"column\">");
    out.push_str(&format!(
        "<span class=\"username\">{}</span>",
        escape(&post.username)
    ));
    if card.is_editing() {
        out.push_str(&format!(
            "<textarea rows=\"5\" maxlength=\"{}\">{}</textarea>",
            card.config().draft_max_chars,
            escape(card.draft_text())
        ));
    } else {
        out.push_str(&format!(
            "<p class=\"payload\">{}</p>",
            escape(&post.tweet)
        ));
    }
    if card.is_owner() {
        out.push_str("<button data-action=\"delete\">Delete</button>");
        let label = if card.is_editing() { "Save" } else { "Edit" };
        out.push_str(&format!("<button data-action=\"edit\">{label}</button>"));
    }
    out.push_str("</div>");

    out.push_str("<div class=\"column\">");
    if card.is_editing() {
        let label = if card.display_photo().is_some() {
            "Edit Photo"
        } else {
            "Add Photo"
        };
        out.push_str(&format!(
            "<button data-action=\"choose-photo\">{label}</button>"
        ));
        out.push_str("<button data-action=\"cancel\">Cancel</button>");
        out.push_str("<input id=\"file\" type=\"file\" accept=\"image/*\">");
    }
    if let Some(url) = card.display_photo() {
        out.push_str(&format!(
            "<img class=\"photo\" src=\"{}\">",
            escape(url)
        ));
    }
    out.push_str("</div>");

    out.push_str("</article>");
    out
}

fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            _ => out.push(c),
        }
    }
    out
}
