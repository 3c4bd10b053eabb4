use crate::extractor::ExtractError;
use libxml::parser::Parser;
use libxml::tree::{Document, Node};
use libxml::xpath::Context;
use log::{debug, error};

pub struct Util;

impl Util {
    pub fn parse_html(html: &str) -> Result<Document, ExtractError> {
        let parser = Parser::default_html();
        parser.parse_string(html).map_err(|err| {
            error!("Parsing HTML failed for downloaded HTML {:?}", err);
            ExtractError::Xml
        })
    }

    pub fn get_xpath_ctx(doc: &Document) -> Result<Context, ExtractError> {
        Context::new(doc).map_err(|()| {
            error!("Creating xpath context failed for downloaded HTML");
            ExtractError::Xml
        })
    }

    pub fn evaluate_xpath(xpath_ctx: &Context, xpath: &str) -> Result<Vec<Node>, ExtractError> {
        let res = xpath_ctx.evaluate(xpath).map_err(|()| {
            debug!("Evaluation of xpath '{}' failed", xpath);
            ExtractError::Xml
        })?;

        let node_vec = res.get_nodes_as_vec();
        if node_vec.is_empty() {
            debug!("Evaluation of xpath '{}' yielded no results", xpath);
        }

        Ok(node_vec)
    }

    /// Text content of the first node matching `xpath`.
    pub fn extract_value(xpath_ctx: &Context, xpath: &str) -> Option<String> {
        Self::evaluate_xpath(xpath_ctx, xpath)
            .ok()?
            .first()
            .map(|node| node.get_content())
    }
}
