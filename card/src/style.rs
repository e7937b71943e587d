//! Style-class names attached to output nodes, and the reference
//! stylesheet a host can install to present them.

pub const CARD: &str = "lark-card";
pub const HEADER: &str = "lark-card-header";
pub const ELEMENTS: &str = "lark-card-elements";
pub const ELEMENT: &str = "lark-card-element";
pub const COLUMN: &str = "lark-card-column";
pub const EMBEDDED: &str = "lark-card-embedded";
pub const EMBEDDED_TEXT: &str = "text";
pub const EMBEDDED_IMG: &str = "img";
pub const COMPACT: &str = "compact";

/// CSS matching the class names above.
pub const STYLESHEET: &str = r#"
.lark-card {
  background: #fff;
  border: 1px solid #dee0e3;
  border-radius: 10px;
  overflow: hidden;
  font-family: -apple-system, BlinkMacSystemFont, Segoe UI, Roboto, Helvetica Neue, sans-serif;
  width: 100%;
}
.lark-card-header {
  -webkit-line-clamp: 2;
  -webkit-box-orient: vertical;
  display: -webkit-box;
  background-color: var(--background-color);
  padding: 12px;
  color: var(--text-color);
  font-size: 16px;
  font-weight: 600;
  line-height: 24px;
  overflow: hidden;
}
.lark-card-header.default { --text-color: #1f2329; --background-color: #fff; }
.lark-card-header.blue { --text-color: #245bdb; --background-color: #e1eaff; }
.lark-card-header.wathet { --text-color: #0d6fa3; --background-color: #d9f3fd; }
.lark-card-header.turquoise { --text-color: #078372; --background-color: #d5f6f2; }
.lark-card-header.green { --text-color: #2e8c25; --background-color: #d9f5d6; }
.lark-card-header.yellow { --text-color: #aa7803; --background-color: #faf1d1; }
.lark-card-header.red { --text-color: #d83931; --background-color: #fde2e2; }
.lark-card-header.carmine { --text-color: #c71e63; --background-color: #fdddef; }
.lark-card-header.violet { --text-color: #a21ba8; --background-color: #f8def8; }
.lark-card-header.purple { --text-color: #7d36e0; --background-color: #ece2fe; }
.lark-card-header.indigo { --text-color: #4954e6; --background-color: #e0e9ff; }
.lark-card-header.grey { --text-color: #373c43; --background-color: #eff0f1; }
.lark-card-elements {
  margin-top: 12px;
  padding: 0 12px 12px;
  position: relative;
  user-select: none;
}
.lark-card-element {
  margin-top: 12px;
}
.lark-card-element.img {
  width: 100%;
  height: auto;
  position: relative;
}
.lark-card-element.img.compact {
  max-width: 278px;
}
.lark-card-element.note {
  display: flex;
  flex-wrap: wrap;
}
.lark-card-element.column_set {
  display: flex;
  gap: 8px;
}
.lark-card-column {
  flex: 1 1 0;
  min-width: 0;
}
.lark-card-element.note .lark-card-embedded.img {
  width: 16px;
  height: 16px;
  margin-right: 4px;
}
.lark-card-element.note .lark-card-embedded.text {
  color: rgb(100, 106, 115);
  font-size: 12px;
}
"#;
