use log::warn;
use reqwest::header::{HeaderMap, LINK};
use reqwest::{Client, StatusCode};
use secrecy::{ExposeSecret, SecretString};
use serde_json::Value;
use testcommits::api::{Error, Result};
use url::Url;

pub(crate) type Credentials = (String, SecretString);

/// GETs a JSON document, following `rel="next"` pagination links.
///
/// Each page gets its own single retry on a 401 or on a body that is
/// neither a list nor an object; after the retry the payload is passed on
/// as-is and the caller decides what to make of it. Concatenating pages
/// only works for lists; anything else is an [`Error::UnexpectedPayload`].
pub(crate) async fn grab_json(
    client: &Client,
    auth: Option<&Credentials>,
    url: &str,
    params: &[(&str, &str)],
) -> Result<Value> {
    let (mut result, mut next) = grab_page(client, auth, url, params).await?;
    while let Some(page_url) = next {
        let (page, page_next) = grab_page(client, auth, page_url.as_str(), params).await?;
        result = concat_pages(result, page)?;
        next = page_next;
    }
    Ok(result)
}

async fn grab_page(
    client: &Client,
    auth: Option<&Credentials>,
    url: &str,
    params: &[(&str, &str)],
) -> Result<(Value, Option<Url>)> {
    let mut second_try = false;
    loop {
        let mut request = client.get(url).query(params);
        if let Some((username, secret)) = auth {
            request = request.basic_auth(username, Some(secret.expose_secret()));
        }
        let response = request.send().await.map_err(request_error)?;
        if response.status() == StatusCode::UNAUTHORIZED && !second_try {
            // Happens spuriously now and then; one retry usually fixes it.
            warn!("Got a 401 unauthorized on {}, retrying it", url);
            second_try = true;
            continue;
        }
        let next = next_page_url(response.headers());
        let body: Value = response.json().await.map_err(request_error)?;
        if !body.is_array() && !body.is_object() && !second_try {
            // Wrong type. String error message, probably.
            warn!("Got a wrong type ({}) on {}, retrying it", body, url);
            second_try = true;
            continue;
        }
        return Ok((body, next));
    }
}

fn concat_pages(result: Value, page: Value) -> Result<Value> {
    match (result, page) {
        (Value::Array(mut items), Value::Array(tail)) => {
            items.extend(tail);
            Ok(Value::Array(items))
        }
        (Value::Array(_), other) => Err(Error::UnexpectedPayload(format!(
            "paginated continuation is not a list: {}",
            other
        ))),
        (other, _) => Err(Error::UnexpectedPayload(format!(
            "pagination links on a non-list payload: {}",
            other
        ))),
    }
}

fn next_page_url(headers: &HeaderMap) -> Option<Url> {
    let links = headers.get(LINK)?.to_str().ok()?;
    links.split(',').find_map(|link| {
        let (target, relations) = link.split_once(';')?;
        if !relations.contains(r#"rel="next""#) {
            return None;
        }
        let target = target.trim().strip_prefix('<')?.strip_suffix('>')?;
        Url::parse(target).ok()
    })
}

fn request_error(err: reqwest::Error) -> Error {
    Error::Request(err.into())
}

#[cfg(test)]
mod tests {
    use super::*;
    use reqwest::header::HeaderValue;
    use serde_json::json;

    fn headers_with_link(link: &str) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(LINK, HeaderValue::from_str(link).unwrap());
        headers
    }

    #[test]
    fn next_link_is_extracted() {
        let headers = headers_with_link(
            "<https://api.github.com/x?page=2>; rel=\"next\", <https://api.github.com/x?page=5>; rel=\"last\"",
        );
        let next = next_page_url(&headers).unwrap();
        assert_eq!(next.as_str(), "https://api.github.com/x?page=2");
    }

    #[test]
    fn no_next_relation_means_no_next_page() {
        let headers = headers_with_link("<https://api.github.com/x?page=1>; rel=\"prev\"");
        assert!(next_page_url(&headers).is_none());
        assert!(next_page_url(&HeaderMap::new()).is_none());
    }

    #[test]
    fn lists_are_concatenated() {
        let result = concat_pages(json!([1, 2]), json!([3])).unwrap();
        assert_eq!(result, json!([1, 2, 3]));
    }

    #[test]
    fn non_list_pages_are_rejected() {
        assert!(matches!(
            concat_pages(json!([1]), json!({"message": "nope"})),
            Err(Error::UnexpectedPayload(_))
        ));
        assert!(matches!(
            concat_pages(json!({"message": "nope"}), json!([1])),
            Err(Error::UnexpectedPayload(_))
        ));
    }
}
