use http::Method;
use waymark::{handler, BoxHandler, FilterKind, Params, PatternError, Router, RouterBuilder};

/// Minimal request context handed to handlers by the pipeline below.
#[derive(Debug, Default)]
struct Ctx {
    params: Params,
    result: Option<String>,
}

impl Ctx {
    fn path_param(&self, name: &str) -> &str {
        self.params.get(name).unwrap_or_default()
    }

    fn splat(&self, idx: usize) -> &str {
        self.params.splat(idx).unwrap_or_default()
    }

    fn result_string(&self) -> &str {
        self.result.as_deref().unwrap_or_default()
    }

    fn result(&mut self, result: impl Into<String>) {
        self.result = Some(result.into());
    }
}

type App = RouterBuilder<BoxHandler<Ctx>>;

fn init_logger() {
    let _ = env_logger::builder().is_test(true).try_init();
}

/// Runs before filters, the matched route (or a not found response) and after filters.
fn serve(router: &Router<BoxHandler<Ctx>>, method: Method, path: &str) -> String {
    let mut ctx = Ctx::default();

    for filter in router.match_filters(FilterKind::Before, path) {
        ctx.params = filter.params().clone();
        filter.handler().call(&mut ctx);
    }

    match router.match_route(&method, path) {
        Some(route) => {
            ctx.params = route.params().clone();
            route.handler().call(&mut ctx);
        }
        None => ctx.result("Not found"),
    }

    for filter in router.match_filters(FilterKind::After, path) {
        ctx.params = filter.params().clone();
        filter.handler().call(&mut ctx);
    }

    ctx.result.unwrap_or_default()
}

fn get(router: &Router<BoxHandler<Ctx>>, path: &str) -> String {
    serve(router, Method::GET, path)
}

fn app(configure: impl FnOnce(&mut App) -> Result<(), PatternError>) -> Router<BoxHandler<Ctx>> {
    init_logger();

    let mut app = App::new();
    configure(&mut app).unwrap();
    app.seal()
}

#[test]
fn wildcard_first() {
    let router = app(|app| {
        app.get("/*/test", handler(|ctx: &mut Ctx| ctx.result("!")))?;
        Ok(())
    });
    assert_eq!(get(&router, "/en/test"), "!");
}

#[test]
fn wildcard_middle() {
    let router = app(|app| {
        app.get("/test/*/test", handler(|ctx: &mut Ctx| ctx.result("!")))?;
        Ok(())
    });
    assert_eq!(get(&router, "/test/en/test"), "!");
}

#[test]
fn wildcard_end() {
    let router = app(|app| {
        app.get("/test/*", handler(|ctx: &mut Ctx| ctx.result("!")))?;
        Ok(())
    });
    assert_eq!(get(&router, "/test/en"), "!");
}

#[test]
fn case_sensitive_urls() {
    let router = app(|app| {
        app.get("/My-Url", handler(|ctx: &mut Ctx| ctx.result("OK")))?;
        Ok(())
    });
    assert_eq!(get(&router, "/MY-URL"), "Not found");
    assert_eq!(get(&router, "/My-Url"), "OK");
}

#[test]
fn encoded_path_param() {
    let router = app(|app| {
        app.get(
            "/:path-param",
            handler(|ctx: &mut Ctx| ctx.result(ctx.path_param("path-param").to_owned())),
        )?;
        Ok(())
    });
    assert_eq!(get(&router, "/TE%2FST"), "TE/ST");
}

#[test]
fn path_params_are_case_sensitive() {
    let router = app(|app| {
        app.get(
            "/:userId",
            handler(|ctx: &mut Ctx| ctx.result(ctx.path_param("userId").to_owned())),
        )?;
        app.get(
            "/:a/:A",
            handler(|ctx: &mut Ctx| {
                let res = format!("{}-{}", ctx.path_param("a"), ctx.path_param("A"));
                ctx.result(res)
            }),
        )?;
        Ok(())
    });
    assert_eq!(get(&router, "/path-param"), "path-param");
    assert_eq!(get(&router, "/a/B"), "a-B");
}

#[test]
fn path_param_values_retain_casing() {
    let router = app(|app| {
        app.get(
            "/:path-param",
            handler(|ctx: &mut Ctx| ctx.result(ctx.path_param("path-param").to_owned())),
        )?;
        Ok(())
    });
    assert_eq!(get(&router, "/SomeCamelCasedValue"), "SomeCamelCasedValue");
}

#[test]
fn path_regex() {
    let router = app(|app| {
        app.get(
            "/:path-param/[0-9]+/",
            handler(|ctx: &mut Ctx| ctx.result(ctx.path_param("path-param").to_owned())),
        )?;
        Ok(())
    });
    assert_eq!(get(&router, "/test/pathParam"), "Not found");
    assert_eq!(get(&router, "/test/21"), "test");
}

#[test]
fn automatic_slash_prefixing() {
    let router = app(|app| {
        app.with_prefix("test", |test| {
            test.with_prefix(":id", |id| {
                id.get(
                    "",
                    handler(|ctx: &mut Ctx| ctx.result(ctx.path_param("id").to_owned())),
                )?;
                Ok(())
            })?;
            test.get("", handler(|ctx: &mut Ctx| ctx.result("test")))?;
            Ok(())
        })?;
        Ok(())
    });
    assert_eq!(get(&router, "/test/path-param/"), "path-param");
    assert_eq!(get(&router, "/test/"), "test");
    assert_eq!(get(&router, "/test"), "test");
}

#[test]
fn non_sub_path_wildcard_for_paths() {
    let routes = |app: &mut App| -> Result<(), PatternError> {
        app.get("/p", handler(|ctx: &mut Ctx| ctx.result("GET")))?;
        app.get("/p/test", handler(|ctx: &mut Ctx| ctx.result("GET")))?;
        Ok(())
    };

    let router = app(routes);
    assert_eq!(get(&router, "/p"), "GET");
    assert_eq!(get(&router, "/p/test"), "GET");

    let router = app(|app| {
        routes(&mut *app)?;
        app.after(
            "/p*",
            handler(|ctx: &mut Ctx| {
                let res = format!("{}AFTER", ctx.result_string());
                ctx.result(res)
            }),
        )?;
        Ok(())
    });
    assert_eq!(get(&router, "/p"), "GETAFTER");
    assert_eq!(get(&router, "/p/test"), "GETAFTER");
}

#[test]
fn non_sub_path_wildcard_for_path_params() {
    let routes = |app: &mut App| -> Result<(), PatternError> {
        let append_pp = || {
            handler(|ctx: &mut Ctx| {
                let res = format!("{}{}", ctx.result_string(), ctx.path_param("pp"));
                ctx.result(res)
            })
        };
        app.get("/:pp", append_pp())?;
        app.get("/:pp/test", append_pp())?;
        Ok(())
    };

    let router = app(routes);
    assert_eq!(get(&router, "/123"), "123");
    assert_eq!(get(&router, "/123/test"), "123");

    let router = app(|app| {
        routes(&mut *app)?;
        app.before("/:pp*", handler(|ctx: &mut Ctx| ctx.result("BEFORE")))?;
        Ok(())
    });
    assert_eq!(get(&router, "/123"), "BEFORE123");
    assert_eq!(get(&router, "/123/test"), "BEFORE123");
}

#[test]
fn before_filter_sees_its_own_params() {
    let router = app(|app| {
        app.before(
            "/:pp*",
            handler(|ctx: &mut Ctx| ctx.result(ctx.path_param("pp").to_owned())),
        )?;
        Ok(())
    });

    // no route, so the handler step overwrites with not found
    assert_eq!(get(&router, "/123/test"), "Not found");

    let filters = router.match_filters(FilterKind::Before, "/123/test");
    assert_eq!(filters.len(), 1);
    assert_eq!(filters[0].path_param("pp").unwrap(), "123");
}

#[test]
fn path_param_and_splat() {
    let router = app(|app| {
        app.get(
            "/path/:path-param/*",
            handler(|ctx: &mut Ctx| {
                let res = format!("/{}/{}", ctx.path_param("path-param"), ctx.splat(0));
                ctx.result(res)
            }),
        )?;
        Ok(())
    });
    assert_eq!(get(&router, "/path/P/S"), "/P/S");
}

#[test]
fn encoded_splat() {
    let router = app(|app| {
        app.get(
            "/:path-param/path/*",
            handler(|ctx: &mut Ctx| {
                let res = format!("{}{}", ctx.path_param("path-param"), ctx.splat(0));
                ctx.result(res)
            }),
        )?;
        Ok(())
    });
    assert_eq!(
        get(&router, "/java%2Fkotlin/path/%2Fjava%2Fkotlin"),
        "java/kotlin/java/kotlin"
    );
}

#[test]
fn splat_list() {
    let router = app(|app| {
        app.get(
            "/*/*/*",
            handler(|ctx: &mut Ctx| {
                let res = format!("{:?}", ctx.params.splats());
                ctx.result(res)
            }),
        )?;
        Ok(())
    });
    assert_eq!(get(&router, "/1/2/3"), r#"["1", "2", "3"]"#);
}

#[test]
fn methods_are_separate() {
    let router = app(|app| {
        app.get("/item", handler(|ctx: &mut Ctx| ctx.result("get")))?;
        app.post("/item", handler(|ctx: &mut Ctx| ctx.result("post")))?;
        app.delete("/item", handler(|ctx: &mut Ctx| ctx.result("delete")))?;
        Ok(())
    });

    assert_eq!(serve(&router, Method::GET, "/item"), "get");
    assert_eq!(serve(&router, Method::POST, "/item"), "post");
    assert_eq!(serve(&router, Method::DELETE, "/item"), "delete");
    assert_eq!(serve(&router, Method::PUT, "/item"), "Not found");
    assert_eq!(
        router.allowed_methods("/item"),
        [Method::GET, Method::POST, Method::DELETE]
    );
}

#[test]
fn matching_is_idempotent() {
    let router = app(|app| {
        app.get("/path/:path-param/*", handler(|_: &mut Ctx| {}))?;
        Ok(())
    });

    let first = router.match_route(&Method::GET, "/path/P/S").unwrap();
    let second = router.match_route(&Method::GET, "/path/P/S").unwrap();
    assert_eq!(first.params(), second.params());
    assert_eq!(first.template(), second.template());
}

#[test]
fn invalid_templates_are_rejected() {
    init_logger();

    let mut app = App::new();
    assert!(matches!(
        app.get("/p*", handler(|_: &mut Ctx| {})),
        Err(PatternError::WildcardInRoute { .. })
    ));
    assert!(matches!(
        app.before("/p*/x", handler(|_: &mut Ctx| {})),
        Err(PatternError::MisplacedWildcard { .. })
    ));
    assert!(matches!(
        app.get("/[0-9]+", handler(|_: &mut Ctx| {})),
        Err(PatternError::DanglingRegex { .. })
    ));

    assert_eq!(app.seal().routes().count(), 0);
}
