use urlencoding::encode;

use crate::{
    client::ApiClient,
    error::Result,
    models::blog::{Blog, BlogDraft},
};

pub async fn list_blogs(api: &ApiClient) -> Result<Vec<Blog>> {
    api.get("/blogs").await
}

pub async fn get_blog(api: &ApiClient, blog_id: &str) -> Result<Blog> {
    api.get(&format!("/blogs/{}", encode(blog_id))).await
}

pub async fn blogs_by_category(api: &ApiClient, category: &str) -> Result<Vec<Blog>> {
    api.get(&format!("/blogs/category/{}", encode(category))).await
}

pub async fn search_blogs(api: &ApiClient, keyword: &str) -> Result<Vec<Blog>> {
    api.get(&format!("/blogs/search?keyword={}", encode(keyword)))
        .await
}

pub async fn create_blog(api: &ApiClient, draft: &BlogDraft) -> Result<Blog> {
    api.post("/blogs", draft).await
}

pub async fn update_blog(api: &ApiClient, blog_id: &str, blog: &Blog) -> Result<Blog> {
    api.put(&format!("/blogs/{}", encode(blog_id)), blog).await
}

pub async fn delete_blog(api: &ApiClient, blog_id: &str) -> Result<()> {
    api.delete(&format!("/blogs/{}", encode(blog_id))).await
}
