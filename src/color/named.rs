//! CSS named colors
//!
//! Fixed table of the CSS color keywords, sorted by name. Several names
//! share one RGB value (aqua/cyan, gray/grey, ...); reverse lookup returns
//! the last such name in table order.

use crate::color::Rgb;

/// One entry of the CSS name table
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NamedColor {
    name: &'static str,
    rgb: Rgb,
}

impl NamedColor {
    /// CSS keyword, lowercase
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// RGB value of the keyword
    pub fn rgb(&self) -> Rgb {
        self.rgb
    }
}

const fn entry(name: &'static str, red: u8, green: u8, blue: u8) -> NamedColor {
    NamedColor {
        name,
        rgb: Rgb { red, green, blue },
    }
}

/// CSS color keywords
pub const NAMED_COLORS: &[NamedColor] = &[
    entry("aliceblue", 240, 248, 255),
    entry("antiquewhite", 250, 235, 215),
    entry("aqua", 0, 255, 255),
    entry("aquamarine", 127, 255, 212),
    entry("azure", 240, 255, 255),
    entry("beige", 245, 245, 220),
    entry("bisque", 255, 228, 196),
    entry("black", 0, 0, 0),
    entry("blanchedalmond", 255, 235, 205),
    entry("blue", 0, 0, 255),
    entry("blueviolet", 138, 43, 226),
    entry("brown", 165, 42, 42),
    entry("burlywood", 222, 184, 135),
    entry("cadetblue", 95, 158, 160),
    entry("chartreuse", 127, 255, 0),
    entry("chocolate", 210, 105, 30),
    entry("coral", 255, 127, 80),
    entry("cornflowerblue", 100, 149, 237),
    entry("cornsilk", 255, 248, 220),
    entry("crimson", 220, 20, 60),
    entry("cyan", 0, 255, 255),
    entry("darkblue", 0, 0, 139),
    entry("darkcyan", 0, 139, 139),
    entry("darkgoldenrod", 184, 134, 11),
    entry("darkgray", 169, 169, 169),
    entry("darkgreen", 0, 100, 0),
    entry("darkgrey", 169, 169, 169),
    entry("darkkhaki", 189, 183, 107),
    entry("darkmagenta", 139, 0, 139),
    entry("darkolivegreen", 85, 107, 47),
    entry("darkorange", 255, 140, 0),
    entry("darkorchid", 153, 50, 204),
    entry("darkred", 139, 0, 0),
    entry("darksalmon", 233, 150, 122),
    entry("darkseagreen", 143, 188, 143),
    entry("darkslateblue", 72, 61, 139),
    entry("darkslategray", 47, 79, 79),
    entry("darkslategrey", 47, 79, 79),
    entry("darkturquoise", 0, 206, 209),
    entry("darkviolet", 148, 0, 211),
    entry("deeppink", 255, 20, 147),
    entry("deepskyblue", 0, 191, 255),
    entry("dimgray", 105, 105, 105),
    entry("dimgrey", 105, 105, 105),
    entry("dodgerblue", 30, 144, 255),
    entry("firebrick", 178, 34, 34),
    entry("floralwhite", 255, 250, 240),
    entry("forestgreen", 34, 139, 34),
    entry("fuchsia", 255, 0, 255),
    entry("gainsboro", 220, 220, 220),
    entry("ghostwhite", 248, 248, 255),
    entry("gold", 255, 215, 0),
    entry("goldenrod", 218, 165, 32),
    entry("gray", 128, 128, 128),
    entry("green", 0, 128, 0),
    entry("greenyellow", 173, 255, 47),
    entry("grey", 128, 128, 128),
    entry("honeydew", 240, 255, 240),
    entry("hotpink", 255, 105, 180),
    entry("indianred", 205, 92, 92),
    entry("indigo", 75, 0, 130),
    entry("ivory", 255, 255, 240),
    entry("khaki", 240, 230, 140),
    entry("lavender", 230, 230, 250),
    entry("lavenderblush", 255, 240, 245),
    entry("lawngreen", 124, 252, 0),
    entry("lemonchiffon", 255, 250, 205),
    entry("lightblue", 173, 216, 230),
    entry("lightcoral", 240, 128, 128),
    entry("lightcyan", 224, 255, 255),
    entry("lightgoldenrodyellow", 250, 250, 210),
    entry("lightgray", 211, 211, 211),
    entry("lightgreen", 144, 238, 144),
    entry("lightgrey", 211, 211, 211),
    entry("lightpink", 255, 182, 193),
    entry("lightsalmon", 255, 160, 122),
    entry("lightseagreen", 32, 178, 170),
    entry("lightskyblue", 135, 206, 250),
    entry("lightslategray", 119, 136, 153),
    entry("lightslategrey", 119, 136, 153),
    entry("lightsteelblue", 176, 196, 222),
    entry("lightyellow", 255, 255, 224),
    entry("lime", 0, 255, 0),
    entry("limegreen", 50, 205, 50),
    entry("linen", 250, 240, 230),
    entry("magenta", 255, 0, 255),
    entry("maroon", 128, 0, 0),
    entry("mediumaquamarine", 102, 205, 170),
    entry("mediumblue", 0, 0, 205),
    entry("mediumorchid", 186, 85, 211),
    entry("mediumpurple", 147, 112, 219),
    entry("mediumseagreen", 60, 179, 113),
    entry("mediumslateblue", 123, 104, 238),
    entry("mediumspringgreen", 0, 250, 154),
    entry("mediumturquoise", 72, 209, 204),
    entry("mediumvioletred", 199, 21, 133),
    entry("midnightblue", 25, 25, 112),
    entry("mintcream", 245, 255, 250),
    entry("mistyrose", 255, 228, 225),
    entry("moccasin", 255, 228, 181),
    entry("navajowhite", 255, 222, 173),
    entry("navy", 0, 0, 128),
    entry("oldlace", 253, 245, 230),
    entry("olive", 128, 128, 0),
    entry("olivedrab", 107, 142, 35),
    entry("orange", 255, 165, 0),
    entry("orangered", 255, 69, 0),
    entry("orchid", 218, 112, 214),
    entry("palegoldenrod", 238, 232, 170),
    entry("palegreen", 152, 251, 152),
    entry("paleturquoise", 175, 238, 238),
    entry("palevioletred", 219, 112, 147),
    entry("papayawhip", 255, 239, 213),
    entry("peachpuff", 255, 218, 185),
    entry("peru", 205, 133, 63),
    entry("pink", 255, 192, 203),
    entry("plum", 221, 160, 221),
    entry("powderblue", 176, 224, 230),
    entry("purple", 128, 0, 128),
    entry("rebeccapurple", 102, 51, 153),
    entry("red", 255, 0, 0),
    entry("rosybrown", 188, 143, 143),
    entry("royalblue", 65, 105, 225),
    entry("saddlebrown", 139, 69, 19),
    entry("salmon", 250, 128, 114),
    entry("sandybrown", 244, 164, 96),
    entry("seagreen", 46, 139, 87),
    entry("seashell", 255, 245, 238),
    entry("sienna", 160, 82, 45),
    entry("silver", 192, 192, 192),
    entry("skyblue", 135, 206, 235),
    entry("slateblue", 106, 90, 205),
    entry("slategray", 112, 128, 144),
    entry("slategrey", 112, 128, 144),
    entry("snow", 255, 250, 250),
    entry("springgreen", 0, 255, 127),
    entry("steelblue", 70, 130, 180),
    entry("tan", 210, 180, 140),
    entry("teal", 0, 128, 128),
    entry("thistle", 216, 191, 216),
    entry("tomato", 255, 99, 71),
    entry("turquoise", 64, 224, 208),
    entry("violet", 238, 130, 238),
    entry("wheat", 245, 222, 179),
    entry("white", 255, 255, 255),
    entry("whitesmoke", 245, 245, 245),
    entry("yellow", 255, 255, 0),
    entry("yellowgreen", 154, 205, 50),
];

/// Resolve a CSS keyword, ignoring case and surrounding whitespace
pub fn lookup_name(name: &str) -> Option<NamedColor> {
    let wanted = name.trim().to_ascii_lowercase();
    NAMED_COLORS
        .binary_search_by(|c| c.name.cmp(wanted.as_str()))
        .ok()
        .map(|i| NAMED_COLORS[i])
}

/// Find the keyword whose RGB value is exactly `rgb`
pub fn lookup_rgb(rgb: Rgb) -> Option<NamedColor> {
    NAMED_COLORS.iter().rev().find(|c| c.rgb == rgb).copied()
}
