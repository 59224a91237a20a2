use pdf_schemas::layout::{DynamicFontSize, FitMode};
use pdf_schemas::schemas::{NumOfBcps, Plugin, ProgressBar, TextThreshold};
use pdf_schemas::ui::{Capabilities, ChangePatch, Editor, EventHandler, Mode, UiRenderContext};
use pdf_schemas::{Font, FontSet, Pt, Schema, Variables};

fn fonts() -> FontSet {
    let font = Font::load(include_bytes!("../assets/DejaVuSansMono.ttf").to_vec())
        .expect("can load font");
    FontSet::single("mono", font)
}

fn context<'a>(mode: Mode, fonts: &'a FontSet, variables: &'a Variables) -> UiRenderContext<'a> {
    UiRenderContext {
        mode,
        capabilities: Capabilities::default(),
        fonts,
        variables,
        tab_index: None,
    }
}

#[test]
fn viewers_see_one_span_per_grapheme() {
    let fonts = fonts();
    let variables = Variables::new();
    let mut schema = NumOfBcps.default_schema();
    schema.base.name = "count".into();

    let render = Schema::NumOfBcps(schema)
        .render_ui(&context(Mode::Viewer, &fonts, &variables), " 42 ")
        .expect("can render");
    assert!(render.editor.is_none());

    let block = render.root.find("text-count").expect("has a text block");
    assert_eq!(block.children.len(), 2);
    assert_eq!(block.text_content(), "42");
    assert_eq!(block.children[0].style_value("letter-spacing"), Some("inherit"));
    assert_eq!(block.children[1].style_value("letter-spacing"), Some("0"));
    assert_eq!(render.root.style_value("border"), Some("2px solid #000000"));
    assert_eq!(render.root.style_value("background-color"), Some("#C6EFCE"));
}

#[test]
fn forms_edit_unless_read_only() {
    let fonts = fonts();
    let variables = Variables::new();
    let mut schema = TextThreshold.default_schema();
    schema.base.name = "note".into();
    let editable = Schema::TextThreshold(schema.clone());
    schema.base.read_only = true;
    let read_only = Schema::TextThreshold(schema);

    let ctx = context(Mode::Form, &fonts, &variables);
    let render = editable.render_ui(&ctx, "hello").expect("can render");
    let block = render.root.find("text-note").expect("has a text block");
    assert_eq!(block.attribute("contenteditable"), Some("plaintext-only"));
    assert!(block.handles("blur", EventHandler::CommitContent));
    assert!(!block.handles("mount", EventHandler::FocusAtEnd));

    let Some(Editor::Text(editor)) = render.editor else {
        panic!("expected a text editor");
    };
    assert_eq!(editor.commit("bye"), ChangePatch::content("bye"));

    let render = read_only.render_ui(&ctx, "hello").expect("can render");
    assert!(render.editor.is_none());
}

#[test]
fn firefox_handles_line_breaks_and_paste_itself() {
    let fonts = fonts();
    let variables = Variables::new();
    let mut schema = TextThreshold.default_schema();
    schema.base.name = "note".into();

    let ctx = UiRenderContext {
        capabilities: Capabilities::from_user_agent("Mozilla/5.0 Gecko/20100101 Firefox/128.0"),
        ..context(Mode::Designer, &fonts, &variables)
    };
    let render = Schema::TextThreshold(schema)
        .render_ui(&ctx, "hello")
        .expect("can render");
    let block = render.root.find("text-note").expect("has a text block");
    assert_eq!(block.attribute("contenteditable"), Some("true"));
    assert!(block.handles("keydown", EventHandler::InsertLineBreak));
    assert!(block.handles("paste", EventHandler::PastePlainText));
    assert!(block.handles("mount", EventHandler::FocusAtEnd));
}

#[test]
fn designers_see_a_placeholder_colour_when_empty() {
    let fonts = fonts();
    let variables = Variables::new();
    let mut schema = TextThreshold.default_schema();
    schema.base.name = "note".into();
    let schema = Schema::TextThreshold(schema);

    let render = schema
        .render_ui(&context(Mode::Designer, &fonts, &variables), "")
        .expect("can render");
    let block = render.root.find("text-note").expect("has a text block");
    assert_eq!(block.style_value("color"), Some("#A0A0A0"));

    let render = schema
        .render_ui(&context(Mode::Designer, &fonts, &variables), "x")
        .expect("can render");
    let block = render.root.find("text-note").expect("has a text block");
    assert_eq!(block.style_value("color"), Some("#000000"));
}

#[test]
fn typing_shrinks_a_dynamic_font_size() {
    let fonts = fonts();
    let variables = Variables::new();
    let mut schema = TextThreshold.default_schema();
    schema.base.name = "note".into();
    schema.text.dynamic_font_size = Some(DynamicFontSize {
        min: 4.0,
        max: 30.0,
        fit: FitMode::Horizontal,
    });

    let mut render = Schema::TextThreshold(schema)
        .render_ui(&context(Mode::Form, &fonts, &variables), "hi")
        .expect("can render");
    let block = render.root.find("text-note").expect("has a text block");
    assert!(block.handles("keyup", EventHandler::RecomputeFontSize));

    let Some(Editor::Text(editor)) = render.editor.as_mut() else {
        panic!("expected a text editor");
    };
    let before = editor.font_size();
    let update = editor
        .on_keyup(&fonts, "a much, much longer line of text")
        .expect("recomputes the size");
    assert!(update.font_size < before);
    assert_eq!(editor.font_size(), update.font_size);
    assert!(update.font_size >= Pt(4.0));

    let block = render.root.find_mut("text-note").expect("has a text block");
    update.apply_to(block);
    assert_eq!(
        block.style_value("font-size"),
        Some(format!("{}pt", update.font_size).as_str())
    );
}

#[test]
fn dragging_a_progress_bar_updates_it() {
    let fonts = fonts();
    let variables = Variables::new();
    let mut schema = ProgressBar.default_schema();
    schema.base.name = "done".into();

    let mut render = Schema::ProgressBar(schema)
        .render_ui(&context(Mode::Designer, &fonts, &variables), "30")
        .expect("can render");
    let Some(Editor::Progress(mut editor)) = render.editor.take() else {
        panic!("expected a progress editor");
    };

    let update = editor.on_input("64");
    assert_eq!(update.patch, ChangePatch::content("64"));
    editor.apply(&update, &mut render.root);

    let bar = render.root.find("progress-bar-done").expect("has a bar");
    assert_eq!(bar.style_value("width"), Some("64%"));
    let label = render.root.find("progress-label-done").expect("has a label");
    assert_eq!(label.text_content(), "64%");
}

#[test]
fn progress_bars_are_read_only_in_the_viewer() {
    let fonts = fonts();
    let variables = Variables::new();
    let render = Schema::ProgressBar(ProgressBar.default_schema())
        .render_ui(&context(Mode::Viewer, &fonts, &variables), "150")
        .expect("can render");
    assert!(render.editor.is_none());

    let html = render.root.to_html();
    assert!(html.contains("width: 100%;"));
    assert!(html.contains(">100%</div>"));
    assert!(!html.contains("<input"));
}

#[test]
fn text_is_escaped_in_html() {
    let fonts = fonts();
    let variables = Variables::new();
    let render = Schema::TextThreshold(TextThreshold.default_schema())
        .render_ui(&context(Mode::Form, &fonts, &variables), "<b>&</b>")
        .expect("can render");
    let html = render.root.to_html();
    assert!(html.contains("&lt;b&gt;&amp;&lt;/b&gt;"));
    assert!(!html.contains("<b>"));
}

#[test]
fn new_fields_start_from_defaults() {
    let progress = Schema::default_for("progressBar").expect("known kind");
    assert_eq!(progress.base().content, "50");
    assert!(Schema::default_for("numOfBcps").is_some());
    assert!(Schema::default_for("textThreshold").is_some());
    assert!(Schema::default_for("signature").is_none());
}
