//! Embedded prompt resources.

use crate::template::PromptTemplate;

macro_rules! resource {
    ($fn_name:ident, $file:literal) => {
        pub(crate) fn $fn_name() -> PromptTemplate {
            PromptTemplate::resource($file, include_str!(concat!("../templates/", $file, ".txt")))
        }
    };
}

resource!(content, "content");
resource!(content_story_rules, "content_story_rules");
resource!(content_prayer_rules, "content_prayer_rules");
resource!(content_modification, "content_modification");
resource!(content_feedback, "content_feedback");
resource!(enhance, "enhance");
resource!(titles, "titles");
resource!(description, "description");
resource!(tags, "tags");
resource!(cta, "cta");
resource!(guidance, "guidance");
resource!(modification, "modification");
resource!(thumbnail, "thumbnail");
resource!(thumbnail_style, "thumbnail_style");
resource!(thumbnail_modification, "thumbnail_modification");
resource!(system_pivot, "system_pivot");
resource!(system_localized, "system_localized");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resources_are_non_empty_and_keep_trailing_newlines_where_needed() {
        for template in [
            content(),
            enhance(),
            titles(),
            description(),
            tags(),
            cta(),
            thumbnail(),
            system_pivot(),
            system_localized(),
        ] {
            assert!(!template.template().trim().is_empty(), "{}", template.name());
            assert!(!template.template().ends_with('\n'), "{}", template.name());
        }

        assert!(thumbnail_style().template().ends_with('\n'));
        assert!(thumbnail_modification().template().ends_with('\n'));
        assert!(guidance().template().starts_with(' '));
        assert!(modification().template().starts_with(' '));
    }
}
