use async_trait::async_trait;
use postern_common::{ResourceIdentifier, ensure_trailing_slash, trim_trailing_slash};
use regex::Regex;

use crate::{
    AccessMap, AuthorizationError, BoxedPermissionReader, PermissionMap, PermissionReader,
    PermissionReaderInput,
};

/// Dispatches identifiers to different readers by URL path.
///
/// Each identifier is matched against the configured expressions in order,
/// applied to its path relative to the base URL (leading slash preserved);
/// the first match decides the reader. Identifiers matching no expression
/// receive no verdict.
pub struct PathBasedReader {
    base_url: String,
    routes: Vec<(Regex, BoxedPermissionReader)>,
}

impl PathBasedReader {
    /// Creates a reader for the given base URL and `(expression, reader)`
    /// routes. Fails when an expression is not a valid regex.
    pub fn new(
        base_url: &str,
        routes: impl IntoIterator<Item = (String, BoxedPermissionReader)>,
    ) -> Result<Self, regex::Error> {
        let routes = routes
            .into_iter()
            .map(|(expression, reader)| Ok((Regex::new(&expression)?, reader)))
            .collect::<Result<Vec<_>, regex::Error>>()?;

        Ok(Self {
            base_url: ensure_trailing_slash(base_url),
            routes,
        })
    }

    /// The path of `identifier` relative to the base URL, keeping the
    /// leading slash. `None` when the identifier is outside the base.
    fn relative_path<'a>(&self, identifier: &'a ResourceIdentifier) -> Option<&'a str> {
        let remainder = identifier
            .path()
            .strip_prefix(trim_trailing_slash(&self.base_url))?;
        remainder.starts_with('/').then_some(remainder)
    }
}

#[cfg_attr(not(target_arch = "wasm32"), async_trait)]
#[cfg_attr(target_arch = "wasm32", async_trait(?Send))]
impl PermissionReader for PathBasedReader {
    async fn handle(
        &self,
        input: &PermissionReaderInput,
    ) -> Result<PermissionMap, AuthorizationError> {
        let mut partitions: Vec<AccessMap> = self.routes.iter().map(|_| AccessMap::new()).collect();

        for (identifier, modes) in &input.access_map {
            let Some(relative) = self.relative_path(identifier) else {
                continue;
            };
            if let Some(index) = self
                .routes
                .iter()
                .position(|(expression, _)| expression.is_match(relative))
            {
                partitions[index].insert(identifier.clone(), modes.clone());
            }
        }

        let mut result = PermissionMap::new();
        for ((_, reader), partition) in self.routes.iter().zip(partitions) {
            if partition.is_empty() {
                continue;
            }
            let inner = PermissionReaderInput::new(input.credentials.clone(), partition);
            result.extend(reader.handle_safe(&inner).await?);
        }

        Ok(result)
    }
}
