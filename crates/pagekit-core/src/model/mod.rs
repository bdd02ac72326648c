pub mod accordion;
pub mod banner;
pub mod card;
pub mod component;
pub mod link_group;
pub mod ordering;
pub mod page;
pub mod page_version;
pub mod rich_text;
pub mod shared;
pub mod template;

pub use accordion::{AccordionItem, AccordionItemPatch, AccordionPayload};
pub use banner::{BannerPayload, CallToAction};
pub use card::{CardLink, CardPayload};
pub use component::{Component, ComponentKind, ComponentPayload, TextPayload};
pub use link_group::{Link, LinkGroupPayload, LinkPatch};
pub use page::Page;
pub use page_version::PageVersion;
pub use rich_text::{RichText, RichTextFormat, RichTextMetadata};
pub use shared::{ImageRef, LinkTarget};
pub use template::{PageTemplate, TemplateBlock};
