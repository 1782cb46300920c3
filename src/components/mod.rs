pub mod comment_form;
pub mod edit_form;
pub mod home;
pub mod layout;
pub mod post;
pub mod post_form;
pub mod toast;
