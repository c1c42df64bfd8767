//! Page template for the rendered site

/// Site navigation entries as (site-relative path, label)
pub const NAV_LINKS: &[(&str, &str)] = &[
    ("node/25153.html", "news"),
    ("downloads.html", "downloads"),
    ("program.html", "events"),
    ("basics.html", "basics"),
    ("image.html", "galleries"),
    ("basics/directions.html", "how to get to PAF"),
    ("node/25189.html", "the mattress"),
    ("contacts.html", "contact"),
    ("links.html", "partners"),
];

const STYLE: &str = r#"
        * { box-sizing: border-box; }
        body { font-family: sans-serif; margin: 0; }
        .page-wrapper { display: flex; }
        .left-sidebar { width: 325px; flex-shrink: 0; }
        .logo-container img { display: block; }
        main { flex-grow: 1; padding: 1rem; }
        aside { width: 250px; flex-shrink: 0; padding: 1rem; }
        a { color: #6cc; text-decoration: none; }
        a:hover { color: black; text-decoration: underline; }
        h2 a { color: black; }
        nav ul, aside ul { list-style: none; padding: 0; }
        nav ul li a, aside ul li a { display: block; padding: 0.2rem 0; }
        nav { padding: 1rem; }
        .attendees-mobile { display: none; }
        footer { text-align: center; font-weight: bold; padding: 1rem; }
        .hamburger { display: none; position: absolute; top: 15px; right: 15px; z-index: 1000;
                     background: #333; color: white; border: none; padding: 10px; cursor: pointer; }
        @media (max-width: 800px) {
            .page-wrapper { flex-direction: column; }
            .left-sidebar, main, aside { width: 100%; }
            .left-sidebar { order: 1; }
            main { order: 2; }
            aside { order: 3; display: none; }
            .logo-container { height: 80px; text-align: center; }
            .logo-container img { height: 100%; width: auto; }
            .left-sidebar nav { display: none; }
            body.show-menu .left-sidebar nav,
            body.show-menu .attendees-mobile { display: block; background-color: #333; color: white; }
            .hamburger { display: block; }
        }
"#;

const FOOTER: &str = "Performing Arts Forum - 15, rue Haute 02820 St Erme Outre et Ramecourt - France | Association Loi 1901 SIRET : 499 353 001 000 13";

/// Everything needed to render one page
#[derive(Debug, Clone)]
pub struct PageView<'a> {
    /// Page title, unescaped
    pub title: &'a str,
    pub date: Option<&'a str>,
    /// Whether to show the title/date heading
    pub show_heading: bool,
    /// Rendered body HTML
    pub body_html: &'a str,
    /// `../` repeated once per directory level of the page
    pub root: &'a str,
    pub short_name: &'a str,
    pub home_key: &'a str,
    /// Logo path relative to the site root
    pub logo: &'a str,
    /// Illustrative image as (page key, image path), relative to the site root
    pub feature: Option<(&'a str, &'a str)>,
    /// Sidebar HTML with links already made relative
    pub sidebar_html: &'a str,
}

/// Escapes text for use in HTML content and attribute values
pub fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

/// Renders a complete HTML page
pub fn render_page(view: &PageView<'_>) -> String {
    let root = view.root;
    let home = format!("{}{}", root, view.home_key);

    let mut heading = String::new();
    if view.show_heading {
        heading.push_str(&format!("<h2>{}</h2>", escape_html(view.title)));
        if let Some(date) = view.date {
            heading.push_str(&format!("<div id=\"date\">{}</div>", escape_html(date)));
        }
    }

    let nav: String = NAV_LINKS
        .iter()
        .map(|(path, label)| format!("                    <li><a href=\"{}{}\">{}</a></li>\n", root, path, label))
        .collect();

    let feature = match view.feature {
        Some((page, image)) => format!(
            "<a href=\"{}{}\"><img width=\"100%\" src=\"{}{}\" /></a>",
            root, page, root, image
        ),
        None => String::new(),
    };

    format!(
        r#"<!DOCTYPE html>
<html>
<head>
    <meta charset="utf-8" />
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title>{title} | {short_name}</title>
    <style>{style}</style>
</head>
<body>
    <button class="hamburger" onclick="toggleMenu()">&#9776;</button>
    <div class="page-wrapper">
        <div class="left-sidebar">
            <div class="logo-container">
                <a href="{home}"><img width="323" height="319" src="{root}{logo}" alt="{short_name} logo"></a>
            </div>
            <nav>
                <ul>
                    <li><a href="{home}">home</a></li>
{nav}                </ul>
            <br />
            {feature}
                <div class="attendees-mobile">
                    {sidebar}
                </div>
            </nav>
        </div>
        <main>
            <div id="main-content">
                {heading}
                {body}
            </div>
        </main>
        <aside>
            {sidebar}
        </aside>
    </div>
    <footer>
        {footer}
    </footer>
    <script>
        function toggleMenu() {{
            document.body.classList.toggle('show-menu');
        }}
    </script>
</body>
</html>
"#,
        title = escape_html(view.title),
        short_name = escape_html(view.short_name),
        style = STYLE,
        home = home,
        root = root,
        logo = view.logo,
        nav = nav,
        feature = feature,
        sidebar = view.sidebar_html,
        heading = heading,
        body = view.body_html,
        footer = FOOTER,
    )
}
