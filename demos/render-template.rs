use pdf_schemas::{
    generate, FontCache, FontSet, FontSource, FontSpec, GenerateOptions, Template, Variables,
};

const TEMPLATE: &str = r##"{
    "basePdf": { "width": 210, "height": 297 },
    "schemas": [[
        {
            "type": "numOfBcps",
            "name": "bcps",
            "content": "0",
            "position": { "x": 20, "y": 20 },
            "width": 45,
            "height": 10,
            "alignment": "center",
            "verticalAlignment": "middle"
        },
        {
            "type": "progressBar",
            "name": "progress",
            "content": "0",
            "position": { "x": 20, "y": 40 },
            "width": 150,
            "height": 20
        },
        {
            "type": "textThreshold",
            "name": "score",
            "content": "",
            "position": { "x": 20, "y": 70 },
            "width": 80,
            "height": 30,
            "threshold": 50,
            "backgroundColor": "#E8F0FE",
            "dynamicFontSize": { "min": 8, "max": 36, "fit": "horizontal" }
        },
        {
            "type": "textThreshold",
            "name": "note",
            "content": "",
            "position": { "x": 110, "y": 70 },
            "width": 80,
            "height": 60,
            "rotate": 15,
            "opacity": 0.6,
            "alignment": "justify"
        }
    ]]
}"##;

fn record(bcps: &str, progress: &str, score: &str) -> Variables {
    Variables::from([
        ("bcps".to_string(), bcps.to_string()),
        ("progress".to_string(), progress.to_string()),
        ("score".to_string(), score.to_string()),
        ("note".to_string(), lipsum::lipsum(40)),
    ])
}

fn main() {
    env_logger::init();

    // load a font to embed and use
    let fonts = FontSet::load([(
        "DejaVu Sans Mono",
        FontSpec {
            data: FontSource::Path(
                concat!(env!("CARGO_MANIFEST_DIR"), "/assets/DejaVuSansMono.ttf").into(),
            ),
            fallback: true,
            subset: true,
        },
    )])
    .expect("can load fonts");

    let template = Template::from_json(TEMPLATE).expect("valid template");
    let inputs = [record("3", "72", "81"), record("0", "130", "12")];

    let mut cache = FontCache::new();
    let pdf = generate(
        &template,
        &inputs,
        &fonts,
        &mut cache,
        GenerateOptions::default(),
    )
    .expect("can render template");

    std::fs::write("render-template.pdf", pdf).expect("can write pdf");
}
