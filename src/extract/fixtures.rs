//! Synthetic timeline entries shaped like the default extraction paths.

use crate::dom::{ElementBuilder, Node};

#[derive(Clone, Debug)]
pub(crate) enum NamePart {
    Run(&'static str),
    Glyph(&'static str),
}

#[derive(Clone, Debug)]
pub(crate) struct EntryFixture {
    favorite: Option<&'static str>,
    repost: Option<&'static str>,
    unrepost: Option<&'static str>,
    author_block: bool,
    name: Option<Vec<NamePart>>,
    permalink: bool,
    href: Option<&'static str>,
    datetime: Option<&'static str>,
    body: Option<&'static str>,
    promo_label: Option<&'static str>,
    quoted: bool,
}

fn div() -> ElementBuilder {
    Node::element("div")
}

fn counter(test_id: &str, text: &str) -> ElementBuilder {
    let span = Node::element("span").attr("data-testid", "app-text-transition-container");
    let span = if text.is_empty() { span } else { span.text(text) };
    Node::element("button")
        .attr("data-testid", test_id)
        .child(div().child(span))
}

impl EntryFixture {
    /// Favorites "12", no repost count but an unrepost count of "3", author
    /// "An" + "n" + a dog glyph, body mentioning `KEEB_PD_R7`.
    pub(crate) fn new() -> Self {
        Self {
            favorite: Some("12"),
            repost: None,
            unrepost: Some("3"),
            author_block: true,
            name: Some(vec![
                NamePart::Run("An"),
                NamePart::Run("n"),
                NamePart::Glyph("\u{1f436}"),
            ]),
            permalink: true,
            href: Some("/ann/status/1"),
            datetime: Some("2024-03-01T12:00:00.000Z"),
            body: Some("Entry for #KEEB_PD_R7 today"),
            promo_label: None,
            quoted: false,
        }
    }

    pub(crate) fn favorite(mut self, text: Option<&'static str>) -> Self {
        self.favorite = text;
        self
    }

    pub(crate) fn repost(mut self, text: Option<&'static str>) -> Self {
        self.repost = text;
        self
    }

    pub(crate) fn unrepost(mut self, text: Option<&'static str>) -> Self {
        self.unrepost = text;
        self
    }

    pub(crate) fn without_author_block(mut self) -> Self {
        self.author_block = false;
        self
    }

    pub(crate) fn name(mut self, parts: Option<Vec<NamePart>>) -> Self {
        self.name = parts;
        self
    }

    pub(crate) fn without_permalink(mut self) -> Self {
        self.permalink = false;
        self
    }

    pub(crate) fn href(mut self, href: Option<&'static str>) -> Self {
        self.href = href;
        self
    }

    pub(crate) fn datetime(mut self, datetime: Option<&'static str>) -> Self {
        self.datetime = datetime;
        self
    }

    pub(crate) fn body(mut self, body: Option<&'static str>) -> Self {
        self.body = body;
        self
    }

    pub(crate) fn promo_label(mut self, label: &'static str) -> Self {
        self.promo_label = Some(label);
        self
    }

    pub(crate) fn quoted(mut self) -> Self {
        self.quoted = true;
        self
    }

    /// The full entry container.
    pub(crate) fn build(&self) -> Node {
        div()
            .attr("data-testid", "cellInnerDiv")
            .child(div().child(div().child(self.build_article())))
            .build()
    }

    pub(crate) fn build_article(&self) -> Node {
        let content = div()
            .child(self.header())
            .child(self.body_column())
            .child(self.actions());

        Node::element("article")
            .attr("data-testid", "tweet")
            .child(div().child(div().child(div().attr("class", "avatar")).child(content)))
            .build()
    }

    fn header(&self) -> ElementBuilder {
        let mut header = div();
        if self.author_block {
            header = header.child(self.author_block());
        }
        if let Some(label) = self.promo_label {
            header = header.child(div().child(div().child(div().child(Node::element("span").text(label)))));
        }
        header
    }

    fn author_block(&self) -> ElementBuilder {
        let name_column = match &self.name {
            Some(parts) => {
                let span = Node::element("span").children(parts.iter().map(|part| match part {
                    NamePart::Run(text) => Node::element("span").text(*text),
                    NamePart::Glyph(alt) => Node::element("img")
                        .attr("alt", *alt)
                        .attr("src", "https://example.invalid/emoji.svg"),
                }));
                div().child(
                    div().child(
                        Node::element("a")
                            .attr("role", "link")
                            .attr("href", "/ann")
                            .child(div().child(div().child(span))),
                    ),
                )
            }
            None => div().child(div().text("unnamed")),
        };

        let mut stamp = div();
        if self.permalink {
            let mut anchor = Node::element("a").attr("role", "link");
            if let Some(href) = self.href {
                anchor = anchor.attr("href", href);
            }
            let mut time = Node::element("time");
            if let Some(datetime) = self.datetime {
                time = time.attr("datetime", datetime);
            }
            stamp = stamp.child(anchor.child(time.text("Mar 1")));
        }
        let meta_column = div().child(
            div()
                .child(div().text("@ann"))
                .child(div().text("\u{b7}"))
                .child(stamp),
        );

        div()
            .attr("data-testid", "User-Name")
            .child(name_column)
            .child(meta_column)
    }

    fn body_column(&self) -> ElementBuilder {
        let text = match self.body {
            Some(body) => div().attr("data-testid", "tweetText").text(body),
            None => div().attr("class", "media"),
        };
        let mut column = div().child(text);
        if self.quoted {
            let card = div().child(
                div().attr("tabindex", "0").child(
                    div().child(div().child(Node::element("time").attr("datetime", "2024-02-01T00:00:00.000Z"))),
                ),
            );
            column = column.child(div().attr("class", "spacer")).child(div().child(card));
        }
        column
    }

    fn actions(&self) -> ElementBuilder {
        let mut group = div().attr("role", "group").child(counter("reply", "1"));
        if let Some(text) = self.repost {
            group = group.child(counter("retweet", text));
        }
        if let Some(text) = self.unrepost {
            group = group.child(counter("unretweet", text));
        }
        if let Some(text) = self.favorite {
            group = group.child(counter("like", text));
        }
        div().child(group)
    }
}
