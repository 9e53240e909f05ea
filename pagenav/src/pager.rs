//! Offset page-link planning
//!
//! Given the current page, the total page count, and a window policy,
//! [`plan`] decides which page-number links a pagination control shows and
//! where previous/next point. The planner emits value tokens only; turning
//! a token into a link is the caller's job (encode the target state, build
//! the path).
//!
//! # Example
//!
//! ```rust
//! use pagenav::pager::{plan, PageToken, PageWindow};
//!
//! let plan = plan(5, 10, PageWindow::Ellipsis(2));
//! assert_eq!(plan.previous, Some(4));
//! assert_eq!(plan.next, Some(6));
//! assert_eq!(
//!     plan.tokens,
//!     vec![
//!         PageToken::Page(1),
//!         PageToken::Ellipsis,
//!         PageToken::Page(4),
//!         PageToken::Page(5),
//!         PageToken::Page(6),
//!         PageToken::Ellipsis,
//!         PageToken::Page(10),
//!     ]
//! );
//! ```

use serde::{Deserialize, Serialize};

/// How many page-number links to render around the current page
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PageWindow {
    /// Every page from 1 to the total
    All,
    /// No page-number links at all (previous/next only)
    Hide,
    /// First and last page always, plus up to this many extra pages
    /// around the current one; skipped ranges collapse into an ellipsis
    Ellipsis(usize),
}

/// One token in the planned page-link sequence
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PageToken {
    /// A page-number link (the current page renders unlinked)
    Page(u64),
    /// A collapsed range of skipped pages
    Ellipsis,
}

/// The planned pagination links
///
/// `previous` / `next` are the target page when the link is enabled and
/// `None` when it is disabled; a disabled slot is still rendered but
/// carries no destination.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PagePlan {
    /// Target of the previous link, `None` on the first page
    pub previous: Option<u64>,
    /// Target of the next link, `None` on the last page
    pub next: Option<u64>,
    /// Ordered page tokens per the window policy
    pub tokens: Vec<PageToken>,
}

/// Plan the page links for the current position
///
/// The previous/next slots are always computed regardless of the window
/// policy. The current page is trusted as supplied; positions outside
/// `[1, total_pages]` are not validated here.
///
/// # Example
///
/// ```rust
/// use pagenav::pager::{plan, PageToken, PageWindow};
///
/// let all = plan(2, 3, PageWindow::All);
/// assert_eq!(
///     all.tokens,
///     vec![PageToken::Page(1), PageToken::Page(2), PageToken::Page(3)]
/// );
///
/// let hidden = plan(2, 3, PageWindow::Hide);
/// assert!(hidden.tokens.is_empty());
/// assert_eq!(hidden.previous, Some(1));
/// ```
#[must_use]
pub fn plan(current_page: u64, total_pages: u64, window: PageWindow) -> PagePlan {
    let previous = if current_page > 1 {
        Some(current_page - 1)
    } else {
        None
    };
    let next = if current_page < total_pages {
        Some(current_page + 1)
    } else {
        None
    };

    let tokens = match window {
        PageWindow::Hide => Vec::new(),
        PageWindow::All => (1..=total_pages).map(PageToken::Page).collect(),
        PageWindow::Ellipsis(extra) => ellipsis_tokens(current_page, total_pages, extra as u64),
    };

    PagePlan {
        previous,
        next,
        tokens,
    }
}

/// First/last plus a window of `extra + 1` pages kept as centered on the
/// current page as the bounds allow.
///
/// With an odd `extra` the surplus slot goes after the current page; near
/// either bound the window slides to keep its width before it shrinks. A
/// skipped range of exactly one page is emitted as that page number — an
/// ellipsis standing for a single page would waste the slot.
fn ellipsis_tokens(current: u64, total: u64, extra: u64) -> Vec<PageToken> {
    if total == 0 {
        return Vec::new();
    }
    if extra >= total - 1 {
        return (1..=total).map(PageToken::Page).collect();
    }

    let start = current.saturating_sub(extra / 2).clamp(1, total - extra);
    let end = start + extra;

    let mut tokens = Vec::new();
    if start > 1 {
        tokens.push(PageToken::Page(1));
        if start == 3 {
            tokens.push(PageToken::Page(2));
        } else if start > 3 {
            tokens.push(PageToken::Ellipsis);
        }
    }
    tokens.extend((start..=end).map(PageToken::Page));
    if end < total {
        if end + 2 == total {
            tokens.push(PageToken::Page(total - 1));
        } else if end + 2 < total {
            tokens.push(PageToken::Ellipsis);
        }
        tokens.push(PageToken::Page(total));
    }
    tokens
}
