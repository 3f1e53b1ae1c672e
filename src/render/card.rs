// src/render/card.rs
// =============================================================================
// This module builds the HTML commit card.
//
// The card is one fragment with three blocks, in this order:
//   header   avatar (if any), author login, date, owner/repo link
//   body     the already-rendered commit message, inserted verbatim
//   footer   +additions, -deletions, and the 7-char sha linking to the commit
//
// Every element carries its own style="..." attribute. There is no <style>
// block and no class the viewer is expected to know, so the fragment looks
// the same wherever it is pasted.
//
// generate_card is a pure function: same inputs, byte-identical output.
// =============================================================================

use std::fmt::Write as _;

use super::date::format_commit_date;
use crate::github::CommitData;

const CARD_STYLE: &str = "border:1px solid #d0d7de;border-radius:6px;padding:12px 16px;\
margin:8px 0;max-width:720px;background-color:#ffffff;color:#1f2328;\
font-family:-apple-system,BlinkMacSystemFont,'Segoe UI',Helvetica,Arial,sans-serif;\
font-size:14px;line-height:1.5;";
const HEADER_STYLE: &str = "display:flex;align-items:center;gap:8px;margin-bottom:8px;";
const AVATAR_STYLE: &str = "width:20px;height:20px;border-radius:50%;vertical-align:middle;";
const LOGIN_STYLE: &str = "font-weight:600;color:#1f2328;";
const DATE_STYLE: &str = "color:#656d76;";
const REPO_LINK_STYLE: &str = "margin-left:auto;color:#0969da;text-decoration:none;";
const BODY_STYLE: &str = "margin:0 0 8px 0;overflow-wrap:anywhere;";
const FOOTER_STYLE: &str = "display:flex;align-items:center;gap:12px;padding-top:8px;\
border-top:1px solid #d8dee4;font-size:12px;";
const ADDITIONS_STYLE: &str = "color:#1a7f37;font-weight:600;";
const DELETIONS_STYLE: &str = "color:#d1242f;font-weight:600;";
const SHA_LINK_STYLE: &str = "margin-left:auto;color:#0969da;text-decoration:none;\
font-family:SFMono-Regular,Consolas,'Liberation Mono',Menlo,monospace;";

/// Escapes text for use in HTML content and double-quoted attributes.
pub fn html_escape(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}

/// Renders a commit into a self-contained HTML card.
///
/// `message_html` must already be HTML (see `render_message`); it is inserted
/// as-is. Every other value is escaped.
pub fn generate_card(commit: &CommitData, message_html: &str) -> String {
    let mut html = String::new();

    // Writing into a String cannot fail
    let _ = writeln!(html, "<div style=\"{}\">", CARD_STYLE);

    let _ = writeln!(html, "<div style=\"{}\">", HEADER_STYLE);
    if !commit.author.avatar_url.is_empty() {
        let _ = writeln!(
            html,
            "<img src=\"{}\" alt=\"{}\" width=\"20\" height=\"20\" style=\"{}\">",
            html_escape(&commit.author.avatar_url),
            html_escape(&commit.author.login),
            AVATAR_STYLE
        );
    }
    let _ = writeln!(
        html,
        "<strong style=\"{}\">{}</strong>",
        LOGIN_STYLE,
        html_escape(&commit.author.login)
    );
    let _ = writeln!(
        html,
        "<span style=\"{}\">committed on {}</span>",
        DATE_STYLE,
        html_escape(&format_commit_date(&commit.date))
    );
    let _ = writeln!(
        html,
        "<a href=\"https://github.com/{owner}/{repo}\" style=\"{style}\">{owner}/{repo}</a>",
        owner = html_escape(&commit.owner),
        repo = html_escape(&commit.repo),
        style = REPO_LINK_STYLE
    );
    html.push_str("</div>\n");

    let _ = writeln!(html, "<div style=\"{}\">", BODY_STYLE);
    html.push_str(message_html.trim_end());
    html.push_str("\n</div>\n");

    let _ = writeln!(html, "<div style=\"{}\">", FOOTER_STYLE);
    let _ = writeln!(
        html,
        "<span style=\"{}\">+{}</span>",
        ADDITIONS_STYLE, commit.stats.additions
    );
    let _ = writeln!(
        html,
        "<span style=\"{}\">-{}</span>",
        DELETIONS_STYLE, commit.stats.deletions
    );
    let _ = writeln!(
        html,
        "<a href=\"{}\" style=\"{}\">{}</a>",
        html_escape(&commit.url),
        SHA_LINK_STYLE,
        html_escape(commit.short_sha())
    );
    html.push_str("</div>\n");

    html.push_str("</div>");
    html
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::github::{CommitAuthor, CommitStats};
    use scraper::{Html, Selector};

    const SHA: &str = "37f48bffd26329505282d72c1e1ab8298fdc438c";

    fn commit() -> CommitData {
        CommitData {
            sha: SHA.to_string(),
            message: "Fix bug".to_string(),
            author: CommitAuthor {
                login: "jane".to_string(),
                avatar_url: "https://avatars.example/jane?s=40&v=4".to_string(),
            },
            date: "2024-01-05T10:00:00Z".to_string(),
            stats: CommitStats {
                additions: 12,
                deletions: 3,
            },
            url: format!("https://github.com/owner/repo/commit/{}", SHA),
            owner: "owner".to_string(),
            repo: "repo".to_string(),
        }
    }

    fn select_text(html: &Html, selector: &str) -> Vec<String> {
        let selector = Selector::parse(selector).unwrap();
        html.select(&selector)
            .map(|element| element.text().collect::<String>())
            .collect()
    }

    #[test]
    fn test_is_deterministic() {
        let commit = commit();
        assert_eq!(
            generate_card(&commit, "<p>Fix bug</p>\n"),
            generate_card(&commit, "<p>Fix bug</p>\n")
        );
    }

    #[test]
    fn test_blocks_appear_in_order() {
        let card = generate_card(&commit(), "<p>MESSAGE</p>");
        let header = card.find("jane").unwrap();
        let body = card.find("MESSAGE").unwrap();
        let footer = card.find("+12").unwrap();
        assert!(header < body && body < footer);
    }

    #[test]
    fn test_header_contents() {
        let html = Html::parse_fragment(&generate_card(&commit(), "<p>Fix bug</p>"));

        let avatar = Selector::parse("img").unwrap();
        let img = html.select(&avatar).next().unwrap();
        assert_eq!(img.value().attr("src"), Some("https://avatars.example/jane?s=40&v=4"));

        assert_eq!(select_text(&html, "strong"), vec!["jane"]);
        assert!(select_text(&html, "span")[0].contains("Jan 5, 2024"));

        let links = Selector::parse("a").unwrap();
        let repo_link = html.select(&links).next().unwrap();
        assert_eq!(repo_link.value().attr("href"), Some("https://github.com/owner/repo"));
        assert_eq!(repo_link.text().collect::<String>(), "owner/repo");
    }

    #[test]
    fn test_no_avatar_means_no_img() {
        let mut commit = commit();
        commit.author.avatar_url = String::new();
        let card = generate_card(&commit, "<p>Fix bug</p>");
        assert!(!card.contains("<img"));
    }

    #[test]
    fn test_message_html_is_inserted_verbatim() {
        let body = "<p>Fix <strong>bug</strong> &amp; more</p>";
        let card = generate_card(&commit(), body);
        assert!(card.contains(body));
    }

    #[test]
    fn test_footer_stats_and_sha_link() {
        let html = Html::parse_fragment(&generate_card(&commit(), "<p>Fix bug</p>"));
        let spans = select_text(&html, "span");
        assert!(spans.contains(&"+12".to_string()));
        assert!(spans.contains(&"-3".to_string()));

        let links = Selector::parse("a").unwrap();
        let sha_link = html.select(&links).last().unwrap();
        assert_eq!(sha_link.text().collect::<String>(), "37f48bf");
        assert_eq!(
            sha_link.value().attr("href"),
            Some(format!("https://github.com/owner/repo/commit/{}", SHA).as_str())
        );
    }

    #[test]
    fn test_zero_stats_keep_their_sign() {
        let mut commit = commit();
        commit.stats = CommitStats::default();
        let card = generate_card(&commit, "");
        assert!(card.contains(">+0</span>"));
        assert!(card.contains(">-0</span>"));
    }

    #[test]
    fn test_short_sha_is_used_whole() {
        let mut commit = commit();
        commit.sha = "abc12".to_string();
        let card = generate_card(&commit, "");
        assert!(card.contains(">abc12</a>"));
    }

    #[test]
    fn test_every_card_element_is_inline_styled() {
        let card = generate_card(&commit(), "");
        let html = Html::parse_fragment(&card);
        let all = Selector::parse("div, img, strong, span, a").unwrap();

        let mut count = 0;
        for element in html.select(&all) {
            assert!(
                element.value().attr("style").is_some(),
                "<{}> has no style",
                element.value().name()
            );
            count += 1;
        }
        assert_eq!(count, 11);
        assert!(!card.contains("<style"));
        assert!(!card.contains("class="));
    }

    #[test]
    fn test_commit_fields_are_escaped() {
        let mut commit = commit();
        commit.author.login = "<b>evil</b>".to_string();
        commit.repo = "re\"po".to_string();
        let card = generate_card(&commit, "");
        assert!(card.contains("&lt;b&gt;evil&lt;/b&gt;"));
        assert!(card.contains("re&quot;po"));
        assert!(!card.contains("<b>"));
    }

    #[test]
    fn test_unparseable_date_is_shown_verbatim() {
        let mut commit = commit();
        commit.date = "sometime".to_string();
        assert!(generate_card(&commit, "").contains("committed on sometime"));
    }

    #[test]
    fn test_html_escape() {
        assert_eq!(html_escape("a & b"), "a &amp; b");
        assert_eq!(
            html_escape("<script>alert('x')</script>"),
            "&lt;script&gt;alert(&#39;x&#39;)&lt;/script&gt;"
        );
    }
}
