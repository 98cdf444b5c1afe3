//! # Block Rules
//!
//! Which block identifiers are recognized, and which settings each block
//! may declare. Block-scoped settings are a dynamic mapping from block name
//! to settings node: any well-formed `namespace/name` is accepted, the
//! `core` namespace is checked against the list of known core blocks, and
//! a small table restricts the settings a few core blocks accept.

/// Every core block known to the configuration format.
pub const KNOWN_CORE_BLOCKS: &[&str] = &[
    "core/archives",
    "core/audio",
    "core/avatar",
    "core/block",
    "core/button",
    "core/buttons",
    "core/calendar",
    "core/categories",
    "core/code",
    "core/column",
    "core/columns",
    "core/comment-author-name",
    "core/comment-content",
    "core/comment-date",
    "core/comment-edit-link",
    "core/comment-reply-link",
    "core/comment-template",
    "core/comments",
    "core/cover",
    "core/embed",
    "core/file",
    "core/freeform",
    "core/gallery",
    "core/group",
    "core/heading",
    "core/home-link",
    "core/html",
    "core/image",
    "core/latest-comments",
    "core/latest-posts",
    "core/list",
    "core/loginout",
    "core/media-text",
    "core/missing",
    "core/more",
    "core/navigation",
    "core/navigation-link",
    "core/nextpage",
    "core/page-list",
    "core/paragraph",
    "core/post-author",
    "core/post-comments",
    "core/post-comments-count",
    "core/post-comments-form",
    "core/post-comments-link",
    "core/post-content",
    "core/post-date",
    "core/post-excerpt",
    "core/post-featured-image",
    "core/post-navigation-link",
    "core/post-template",
    "core/post-terms",
    "core/post-title",
    "core/preformatted",
    "core/pullquote",
    "core/query",
    "core/query-pagination",
    "core/query-pagination-next",
    "core/query-pagination-numbers",
    "core/query-pagination-previous",
    "core/query-title",
    "core/quote",
    "core/rss",
    "core/search",
    "core/separator",
    "core/shortcode",
    "core/site-logo",
    "core/site-tagline",
    "core/site-title",
    "core/social-link",
    "core/social-links",
    "core/spacer",
    "core/table",
    "core/table-of-contents",
    "core/tag-cloud",
    "core/template-part",
    "core/term-description",
    "core/text-columns",
    "core/verse",
    "core/video",
    "core/widget-area",
    "core/legacy-widget",
    "core/widget-group",
];

/// Number of known core blocks.
pub const KNOWN_CORE_BLOCK_COUNT: usize = 83;

/// Settings a block may declare at block scope.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BlockRule {
    /// Every settings field is legal.
    Unrestricted,
    /// The block accepts no block-level settings at all.
    NoSettings,
    /// Every field except those under the listed dotted paths.
    Excludes(&'static [&'static str]),
}

impl BlockRule {
    /// Returns true if the settings field at `keys` (relative to the block's
    /// settings node) may be declared for this block.
    pub fn allows<S: AsRef<str>>(&self, keys: &[S]) -> bool {
        match self {
            Self::Unrestricted => true,
            Self::NoSettings => keys.is_empty(),
            Self::Excludes(paths) => !paths.iter().any(|excluded| {
                let excluded: Vec<&str> = excluded.split('.').collect();
                keys.len() >= excluded.len()
                    && excluded.iter().zip(keys).all(|(e, k)| *e == k.as_ref())
            }),
        }
    }
}

/// The rule for `name`.
pub fn block_rule(name: &str) -> BlockRule {
    match name {
        "core/archives" => BlockRule::NoSettings,
        "core/button" => BlockRule::Excludes(&["border.color", "border.style", "border.width"]),
        _ => BlockRule::Unrestricted,
    }
}

/// Returns true if `name` is a known core block.
pub fn is_known_core_block(name: &str) -> bool {
    KNOWN_CORE_BLOCKS.contains(&name)
}
