//! Text block formatting
//!
//! A rendered subtree is a header block followed by the blocks of its
//! children, each child block indented one level deeper than its parent.

use crate::item::Item;

/// Separator printed under a thread root header
pub const RULE: &str = "--------------------";

/// Prefixes every line of `block` with `unit`
pub fn indent_block(block: &str, unit: &str) -> String {
    block
        .split('\n')
        .map(|line| format!("{}{}", unit, line))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Formats the header block of an item with its already converted body
///
/// Stories, jobs and polls get a title header; everything else is laid out
/// as a comment.
pub fn header_block(item: &Item, body: &str) -> String {
    if item.kind.is_thread_root() {
        thread_header(item, body)
    } else {
        comment_header(item, body)
    }
}

fn thread_header(item: &Item, body: &str) -> String {
    let mut lines = vec![format!(
        "{} ({}pts, {}cms)",
        item.title.as_deref().unwrap_or("(untitled)"),
        item.score,
        item.descendants
    )];

    match item.created_at() {
        Some(at) => lines.push(format!(
            "\tby {} at {}",
            item.author(),
            at.format("%Y-%m-%d %H:%M UTC")
        )),
        None => lines.push(format!("\tby {}", item.author())),
    }

    if let Some(url) = item.url.as_deref().filter(|u| !u.is_empty()) {
        lines.push(url.to_string());
    }
    if !body.is_empty() {
        lines.push(body.to_string());
    }
    lines.push(RULE.to_string());

    lines.join("\n")
}

fn comment_header(item: &Item, body: &str) -> String {
    let mut block = format!("-- by {}", item.author());
    if !body.is_empty() {
        block.push('\n');
        block.push_str(body);
    }
    block
}

/// Joins a header with its ordered child blocks, indenting each child by `unit`
pub fn assemble_subtree(header: String, children: &[String], unit: &str) -> String {
    let mut out = header;
    for child in children {
        out.push('\n');
        out.push_str(&indent_block(child, unit));
    }
    out
}

/// Formats the flat numbered listing view
///
/// Each entry ends with a newline; the id hint shows how to open the thread.
pub fn format_listing(items: &[Item]) -> String {
    let mut out = String::new();

    for (idx, item) in items.iter().enumerate() {
        out.push_str(&format!(
            "{}.  {}\n",
            idx + 1,
            item.title.as_deref().unwrap_or("(untitled)")
        ));
        out.push_str(&format!("{}pts\tby {}\n", item.score, item.author()));
        out.push_str(&format!(
            "\t\t{} comments: {} comments {}\n",
            item.descendants,
            env!("CARGO_PKG_NAME"),
            item.id
        ));
        if let Some(url) = item.url.as_deref().filter(|u| !u.is_empty()) {
            out.push_str(&format!("\t\t{}\n", url));
        }
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::item::ItemKind;

    fn story() -> Item {
        Item {
            id: 8863,
            title: Some("My YC app".to_string()),
            score: 111,
            by: Some("dhouston".to_string()),
            url: Some("http://www.getdropbox.com/".to_string()),
            descendants: 71,
            kind: ItemKind::Story,
            ..Default::default()
        }
    }

    fn comment(by: &str) -> Item {
        Item {
            by: Some(by.to_string()),
            kind: ItemKind::Comment,
            ..Default::default()
        }
    }

    #[test]
    fn test_indent_block_prefixes_every_line() {
        assert_eq!(indent_block("a\nb", "\t"), "\ta\n\tb");
        assert_eq!(indent_block("one", "  "), "  one");
        assert_eq!(indent_block("a\n\nb", ">"), ">a\n>\n>b");
    }

    #[test]
    fn test_comment_header() {
        assert_eq!(header_block(&comment("pg"), "Hello"), "-- by pg\nHello");
        assert_eq!(header_block(&comment("pg"), ""), "-- by pg");
    }

    #[test]
    fn test_deleted_comment_header() {
        let item = Item {
            deleted: true,
            kind: ItemKind::Comment,
            ..Default::default()
        };
        assert_eq!(header_block(&item, ""), "-- by [deleted]");
    }

    #[test]
    fn test_story_header() {
        assert_eq!(
            header_block(&story(), ""),
            "My YC app (111pts, 71cms)\n\tby dhouston\nhttp://www.getdropbox.com/\n--------------------"
        );
    }

    #[test]
    fn test_story_header_with_time_and_body() {
        let item = Item {
            url: None,
            time: Some(1175714200),
            ..story()
        };
        assert_eq!(
            header_block(&item, "Ask text"),
            "My YC app (111pts, 71cms)\n\tby dhouston at 2007-04-04 19:16 UTC\nAsk text\n--------------------"
        );
    }

    #[test]
    fn test_assemble_leaf() {
        assert_eq!(assemble_subtree("-- by a".to_string(), &[], "\t"), "-- by a");
    }

    #[test]
    fn test_assemble_nested() {
        let grandchild = "-- by g".to_string();
        let child = assemble_subtree("-- by c\nhi".to_string(), &[grandchild], "\t");
        let root = assemble_subtree("-- by r".to_string(), &[child, "-- by d".to_string()], "\t");
        assert_eq!(root, "-- by r\n\t-- by c\n\thi\n\t\t-- by g\n\t-- by d");
    }

    #[test]
    fn test_format_listing() {
        let second = Item {
            id: 2,
            title: Some("Second".to_string()),
            score: 5,
            by: Some("b".to_string()),
            url: None,
            descendants: 0,
            ..Default::default()
        };
        let out = format_listing(&[story(), second]);
        assert_eq!(
            out,
            "1.  My YC app\n111pts\tby dhouston\n\t\t71 comments: hn-threads comments 8863\n\t\thttp://www.getdropbox.com/\n\
             2.  Second\n5pts\tby b\n\t\t0 comments: hn-threads comments 2\n"
        );
    }

    #[test]
    fn test_format_empty_listing() {
        assert_eq!(format_listing(&[]), "");
    }
}
