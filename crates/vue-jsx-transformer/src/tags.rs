//! Built-in HTML and SVG tag names.

/// HTML element names that lower to string tags.
pub static HTML_TAGS: &[&str] = &[
    "a", "abbr", "address", "area", "article", "aside", "audio", "b", "base", "bdi", "bdo",
    "blockquote", "body", "br", "button", "canvas", "caption", "cite", "code", "col",
    "colgroup", "data", "datalist", "dd", "del", "details", "dfn", "dialog", "div", "dl", "dt",
    "em", "embed", "fieldset", "figcaption", "figure", "footer", "form", "h1", "h2", "h3", "h4",
    "h5", "h6", "head", "header", "hgroup", "hr", "html", "i", "iframe", "img", "input", "ins",
    "kbd", "label", "legend", "li", "link", "main", "map", "mark", "math", "menu", "menuitem",
    "meta", "meter", "nav", "noscript", "object", "ol", "optgroup", "option", "output", "p",
    "param", "picture", "pre", "progress", "q", "rb", "rp", "rt", "rtc", "ruby", "s", "samp",
    "script", "search", "section", "select", "slot", "small", "source", "span", "strong",
    "style", "sub", "summary", "sup", "svg", "table", "tbody", "td", "template", "textarea",
    "tfoot", "th", "thead", "time", "title", "tr", "track", "u", "ul", "var", "video", "wbr",
];

/// SVG element names that lower to string tags.
pub static SVG_TAGS: &[&str] = &[
    "a", "altGlyph", "altGlyphDef", "altGlyphItem", "animate", "animateColor",
    "animateMotion", "animateTransform", "circle", "clipPath", "color-profile", "cursor",
    "defs", "desc", "ellipse", "feBlend", "feColorMatrix", "feComponentTransfer",
    "feComposite", "feConvolveMatrix", "feDiffuseLighting", "feDisplacementMap",
    "feDistantLight", "feFlood", "feFuncA", "feFuncB", "feFuncG", "feFuncR", "feGaussianBlur",
    "feImage", "feMerge", "feMergeNode", "feMorphology", "feOffset", "fePointLight",
    "feSpecularLighting", "feSpotLight", "feTile", "feTurbulence", "filter", "font",
    "font-face", "font-face-format", "font-face-name", "font-face-src", "font-face-uri",
    "foreignObject", "g", "glyph", "glyphRef", "hkern", "image", "line", "linearGradient",
    "marker", "mask", "metadata", "missing-glyph", "mpath", "path", "pattern", "polygon",
    "polyline", "radialGradient", "rect", "script", "set", "stop", "style", "svg", "switch",
    "symbol", "text", "textPath", "title", "tref", "tspan", "use", "view", "vkern",
];

/// Returns true if `tag` is a built-in HTML element.
pub fn is_html_tag(tag: &str) -> bool {
    HTML_TAGS.contains(&tag)
}

/// Returns true if `tag` is a built-in SVG element.
pub fn is_svg_tag(tag: &str) -> bool {
    SVG_TAGS.contains(&tag)
}

/// Returns true if children of `tag` are passed as slots when it is a component.
///
/// `Fragment` (also the generated `_Fragment`, `_Fragment2`, ...) and
/// `KeepAlive` take their children as a plain array.
pub fn should_transform_to_slots(tag: &str) -> bool {
    let base = tag.strip_prefix('_').unwrap_or(tag);
    let is_fragment = base
        .strip_prefix("Fragment")
        .is_some_and(|rest| rest.bytes().all(|b| b.is_ascii_digit()));
    !(is_fragment || tag == "KeepAlive")
}
