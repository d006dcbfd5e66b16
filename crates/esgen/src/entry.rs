//! Entry points: `generate` / `evaluate`.
//!
//! Both build a default bundle, hand the caller a builder scope, then
//! assemble the final document: imports first, then bundle-root
//! declarations in dependency order, then the user's own body content,
//! then (for `evaluate`) the trailing `return { ... };` exports block
//! inside an IIFE wrapper the host evaluator runs in-process.

use esgen_core::{BundleFormat, EsgenError, EsgenResult, Printer};
use esgen_symbols::CodeFragment;

use crate::declarations::render_declarations;
use crate::imports::render_imports;
use crate::options::{BundleOptions, EsBundle};

/// Build and render a bundle with the given options. `build` receives the
/// bundle handle and the root scope's emission span to write into.
#[tracing::instrument(level = "debug", skip(options, build), fields(format = options.format.name()))]
pub fn generate_with(
    options: BundleOptions,
    build: impl FnOnce(&EsBundle, &CodeFragment) -> EsgenResult<()>,
) -> EsgenResult<String> {
    let format = options.format;
    let es_bundle = EsBundle::new(&options);
    let root_scope = es_bundle.root_scope();
    let root_fragment = root_scope.span()?;

    build(&es_bundle, &root_fragment)?;

    es_bundle.bundle().done();

    let body_text = root_fragment.emit(&root_scope);
    let imports_text = render_imports(es_bundle.bundle(), format)?;
    let records = es_bundle.bundle().drain_declarations()?;
    let rendered = render_declarations(es_bundle.bundle(), &root_scope, records, format)?;

    let mut doc = Printer::new();
    if !imports_text.is_empty() {
        doc.print(imports_text.trim_end_matches('\n'));
    }
    if !rendered.text.is_empty() {
        doc.print(rendered.text.trim_end_matches('\n'));
    }
    if !body_text.is_empty() {
        doc.print(body_text.trim_end_matches('\n'));
    }

    match format {
        BundleFormat::Es2015 => {
            if let Some(tail) = &rendered.es_export_tail {
                doc.print(tail.as_str());
            }
            Ok(doc.as_text())
        }
        BundleFormat::Iife => {
            if let Some(tail) = &rendered.iife_return_tail {
                doc.print(tail.as_str());
            }
            let body = doc.as_text();
            let mut wrapped = Printer::new();
            wrapped.print("(async () => {");
            wrapped.indent(|inner| {
                for line in body.trim_end_matches('\n').split('\n') {
                    inner.print(line);
                }
            });
            wrapped.print("})();");
            Ok(wrapped.as_text())
        }
    }
}

/// `esGenerate`: default ES2015-module bundle, returns the generated text.
pub fn generate(
    build: impl FnOnce(&EsBundle, &CodeFragment) -> EsgenResult<()>,
) -> EsgenResult<String> {
    generate_with(BundleOptions::es_module(), build)
}

/// `esEvaluate`: default IIFE bundle, evaluated in-process, returning the
/// object produced by the trailing `return { ... };` exports block.
pub fn evaluate(
    build: impl FnOnce(&EsBundle, &CodeFragment) -> EsgenResult<()>,
) -> EsgenResult<serde_json::Value> {
    let source = generate_with(BundleOptions::iife(), build)?;
    run_in_host(&source)
}

fn run_in_host(source: &str) -> EsgenResult<serde_json::Value> {
    use boa_engine::builtins::promise::PromiseState;
    use boa_engine::object::JsPromise;
    use boa_engine::{Context, Source};

    let mut context = Context::default();
    let value = context
        .eval(Source::from_bytes(source.as_bytes()))
        .map_err(|err| EsgenError::Evaluation(err.to_string()))?;

    // The rendered IIFE is `(async () => { ... })();` - evaluating it
    // produces a pending promise until the job queue (the `await import`
    // microtasks) drains.
    let Some(object) = value.as_object().cloned() else {
        return value.to_json(&mut context).map_err(|err| EsgenError::Evaluation(err.to_string()));
    };
    let promise = JsPromise::from_object(object).map_err(|err| EsgenError::Evaluation(err.to_string()))?;

    context.run_jobs();

    match promise.state() {
        PromiseState::Fulfilled(result) => {
            result.to_json(&mut context).map_err(|err| EsgenError::Evaluation(err.to_string()))
        }
        PromiseState::Rejected(err) => Err(EsgenError::Evaluation(err.display().to_string())),
        PromiseState::Pending => Err(EsgenError::Evaluation(
            "evaluation did not settle after draining the job queue".to_string(),
        )),
    }
}
