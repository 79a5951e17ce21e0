//! Embedded static assets.

pub const CSS: &str = r#"
body { font-family: system-ui, "Noto Sans Bengali", sans-serif; margin: 0; background: #f6f7f9; color: #1d2733; }
#main-header { background: #1d2733; padding: 0.75rem 1.5rem; }
#main-header .logo { color: #fff; font-weight: 600; text-decoration: none; }
main { max-width: 40rem; margin: 2rem auto; padding: 0 1rem; }
fieldset { border: 1px solid #d5dae1; border-radius: 6px; margin-bottom: 1rem; background: #fff; }
fieldset label { display: block; margin: 0.35rem 0; }
input[name="api_key"] { width: 100%; margin-top: 0.5rem; padding: 0.4rem; box-sizing: border-box; }
.btn { display: inline-block; padding: 0.5rem 1.1rem; background: #2463eb; color: #fff; border: 0; border-radius: 4px; text-decoration: none; cursor: pointer; }
.btn-small { margin-left: 1rem; color: #2463eb; }
.flash-error { background: #fdecec; border: 1px solid #f3b4b4; color: #8a1c1c; padding: 0.6rem 0.9rem; border-radius: 4px; margin-bottom: 1rem; }
.success { font-size: 1.1rem; }
"#;
