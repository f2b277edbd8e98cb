//! Localized labels for the settings surface.

use std::fmt;

/// Languages the settings labels are translated into.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub enum Locale {
    #[default]
    En,
    Zh,
}

impl Locale {
    /// Maps a host locale tag onto a supported locale; only simplified
    /// Chinese gets its own table, everything else falls back to English.
    pub fn from_tag(tag: &str) -> Self {
        if tag.trim().eq_ignore_ascii_case("zh-cn") {
            Locale::Zh
        } else {
            Locale::En
        }
    }

    pub fn text(self, key: TextKey) -> &'static str {
        let table = match self {
            Locale::En => EN,
            Locale::Zh => ZH,
        };
        table
            .iter()
            .find(|(candidate, _)| *candidate == key)
            .map(|(_, text)| *text)
            .unwrap_or_else(|| key.as_str())
    }
}

impl fmt::Display for Locale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Locale::En => "en",
            Locale::Zh => "zh",
        })
    }
}

/// Keys into the per-locale text tables.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum TextKey {
    EnableCodeBlock,
    CodeBlockDesc,
    TitleContent,
    CustomTitleContent,
    None,
    CustomTitle,
    ColorContent,
    CustomColor,
    CollapseSetting,
    CollapseDesc,
    Open,
    Close,
    HeadNoadTocTip,
    TailNoadTocTip,
    CustomHeadTip,
    CustomTailTip,
    CodeBlockTip,
    CodeBlockDescTip,
    TocLevel,
    TocLevelDesc,
}

impl TextKey {
    pub const ALL: &'static [TextKey] = &[
        TextKey::EnableCodeBlock,
        TextKey::CodeBlockDesc,
        TextKey::TitleContent,
        TextKey::CustomTitleContent,
        TextKey::None,
        TextKey::CustomTitle,
        TextKey::ColorContent,
        TextKey::CustomColor,
        TextKey::CollapseSetting,
        TextKey::CollapseDesc,
        TextKey::Open,
        TextKey::Close,
        TextKey::HeadNoadTocTip,
        TextKey::TailNoadTocTip,
        TextKey::CustomHeadTip,
        TextKey::CustomTailTip,
        TextKey::CodeBlockTip,
        TextKey::CodeBlockDescTip,
        TextKey::TocLevel,
        TextKey::TocLevelDesc,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            TextKey::EnableCodeBlock => "enableCodeBlock",
            TextKey::CodeBlockDesc => "codeBlockDesc",
            TextKey::TitleContent => "titleContent",
            TextKey::CustomTitleContent => "customTitleContent",
            TextKey::None => "none",
            TextKey::CustomTitle => "customTitle",
            TextKey::ColorContent => "colorContent",
            TextKey::CustomColor => "customColor",
            TextKey::CollapseSetting => "collapseSetting",
            TextKey::CollapseDesc => "collapseDesc",
            TextKey::Open => "open",
            TextKey::Close => "close",
            TextKey::HeadNoadTocTip => "headNoadTocTip",
            TextKey::TailNoadTocTip => "tailNoadTocTip",
            TextKey::CustomHeadTip => "customHeadTip",
            TextKey::CustomTailTip => "customTailTip",
            TextKey::CodeBlockTip => "codeBlockTip",
            TextKey::CodeBlockDescTip => "codeBlockDescTip",
            TextKey::TocLevel => "tocLevel",
            TextKey::TocLevelDesc => "tocLevelDesc",
        }
    }
}

const EN: &[(TextKey, &str)] = &[
    (TextKey::EnableCodeBlock, "Enable code block"),
    (
        TextKey::CodeBlockDesc,
        "Enable or disable the code block. It is recommended to enable this option. If disabled, future TOC updates might cause incorrect document deletions or failure to remove previous TOCs. Before disabling, please back up your document and set appropriate start and end markers.",
    ),
    (TextKey::TitleContent, "Title content"),
    (TextKey::CustomTitleContent, "Custom title content"),
    (TextKey::None, "None"),
    (TextKey::CustomTitle, "Custom title"),
    (TextKey::ColorContent, "Color content"),
    (TextKey::CustomColor, "Custom color"),
    (TextKey::CollapseSetting, "Collapse setting"),
    (TextKey::CollapseDesc, "Whether to open or close the collapse"),
    (TextKey::Open, "Open"),
    (TextKey::Close, "Close"),
    (TextKey::HeadNoadTocTip, "Head no-ad-toc tip"),
    (TextKey::TailNoadTocTip, "Tail no-ad-toc tip"),
    (
        TextKey::CustomHeadTip,
        "Custom head no-ad-toc tip, preferably unique or use the default",
    ),
    (
        TextKey::CustomTailTip,
        "Custom tail no-ad-toc tip, preferably unique or use the default",
    ),
    (TextKey::CodeBlockTip, "Code block title"),
    (TextKey::CodeBlockDescTip, "Customize the title of the code block"),
    (TextKey::TocLevel, "TOC level"),
    (
        TextKey::TocLevelDesc,
        "Deepest heading level included in the TOC (1-6)",
    ),
];

const ZH: &[(TextKey, &str)] = &[
    (TextKey::EnableCodeBlock, "启用代码块"),
    (
        TextKey::CodeBlockDesc,
        "是否启用代码块。建议启用，如果禁用代码块，后续可能会更新目录错误导致的误删文档或者漏删之前的目录，禁用代码使用前请进行备份和设置好两头标识。",
    ),
    (TextKey::TitleContent, "标题内容"),
    (TextKey::CustomTitleContent, "自定义 title 的内容"),
    (TextKey::None, "无"),
    (TextKey::CustomTitle, "自定义标题"),
    (TextKey::ColorContent, "颜色内容"),
    (TextKey::CustomColor, "自定义颜色"),
    (TextKey::CollapseSetting, "折叠设置"),
    (TextKey::CollapseDesc, "是否打开折叠"),
    (TextKey::Open, "开"),
    (TextKey::Close, "关"),
    (TextKey::HeadNoadTocTip, "无代码块头部标识"),
    (TextKey::TailNoadTocTip, "无代码块尾部标识"),
    (
        TextKey::CustomHeadTip,
        "尽量设置不一样的标识，或者使用默认即可，主要检索标识进行删除",
    ),
    (TextKey::CustomTailTip, "尽量设置不一样的标识，或者使用默认即可"),
    (TextKey::CodeBlockTip, "代码块标题"),
    (TextKey::CodeBlockDescTip, "自定义代码块的标题"),
    (TextKey::TocLevel, "目录层级"),
    (TextKey::TocLevelDesc, "目录中包含的最深标题层级（1-6）"),
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_simplified_chinese_selects_zh() {
        assert_eq!(Locale::from_tag("zh-cn"), Locale::Zh);
        assert_eq!(Locale::from_tag("ZH-CN"), Locale::Zh);
        assert_eq!(Locale::from_tag("zh-tw"), Locale::En);
        assert_eq!(Locale::from_tag("fr"), Locale::En);
    }

    #[test]
    fn every_key_is_translated_in_every_locale() {
        for table in [EN, ZH] {
            for key in TextKey::ALL {
                assert!(
                    table.iter().any(|(candidate, _)| candidate == key),
                    "missing translation for {}",
                    key.as_str()
                );
            }
        }
    }

    #[test]
    fn looks_up_localized_text() {
        assert_eq!(Locale::En.text(TextKey::Open), "Open");
        assert_eq!(Locale::Zh.text(TextKey::Open), "开");
    }
}
